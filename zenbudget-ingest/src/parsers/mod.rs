pub mod savings_dataset;
