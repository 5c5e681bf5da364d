pub mod load_from_file;
