use crate::Networks::errors::NetworkError;
use crate::Networks::model_store::ModelRecord;
use log::{error, info, warn};
use std::fs;
use std::path::Path;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_model(&self) -> Result<String, NetworkError> {
        load_model_from_file(&self.file_name)
    }
    pub fn load_records(&self) -> Result<Vec<ModelRecord>, NetworkError> {
        load_and_validate_records(&self.file_name)
    }
}

fn read_file(file_name: &str) -> Result<String, NetworkError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(NetworkError::Store(format!(
            "File '{}' does not exist",
            file_name
        )));
    }
    fs::read_to_string(path)
        .map_err(|e| NetworkError::Store(format!("Failed to open file '{}': {}", file_name, e)))
}

/// Reads a model text file. If the file has a "MODEL" header line, only the lines after it
/// up to the next all-uppercase header are taken; otherwise the whole file is the model.
pub fn load_model_from_file(file_name: &str) -> Result<String, NetworkError> {
    let content = read_file(file_name)?;
    let lines: Vec<&str> = content.lines().collect();

    let start_index = lines
        .iter()
        .position(|line| line.trim().to_uppercase() == "MODEL")
        .map(|i| i + 1);
    let start_index = match start_index {
        Some(index) => index,
        None => return Ok(content),
    };

    // Find the end index (next header or end of file)
    let mut end_index = lines.len();
    for (i, line) in lines.iter().enumerate().skip(start_index) {
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_uppercase() || c == '_') {
            end_index = i;
            break;
        }
    }
    let model = lines[start_index..end_index].join("\n");
    if model.trim().is_empty() {
        warn!("'MODEL' section of file '{}' is empty", file_name);
    }
    Ok(model)
}

/// Parses a JSON array of model records. On a parse error the position and the
/// problematic line are logged.
pub fn load_records_from_file(file_name: &str) -> Result<Vec<ModelRecord>, NetworkError> {
    let content = read_file(file_name)?;
    match serde_json::from_str::<Vec<ModelRecord>>(&content) {
        Ok(records) => {
            info!("Successfully parsed model records from file '{}'", file_name);
            Ok(records)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            error!(
                "Error parsing model records at line {}, column {} of file '{}': {}",
                error_line, error_column, file_name, e
            );
            // If possible, show the problematic line
            if let Some(problem_line) = content.lines().nth(error_line.saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }
            Err(NetworkError::Json(e))
        }
    }
}

/// Loads model records and warns about records the tools cannot use.
pub fn load_and_validate_records(file_name: &str) -> Result<Vec<ModelRecord>, NetworkError> {
    let records = load_records_from_file(file_name)?;
    if records.is_empty() {
        warn!("File '{}' contains no model records", file_name);
    }
    let mut seen = std::collections::HashSet::new();
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            warn!("Model ID '{}' occurs more than once", record.id);
        }
        if !record.model.contains(crate::Networks::reaction_parser::REACTION_ARROW) {
            warn!("Model '{}' has no reaction lines", record.id);
        }
    }
    info!(
        "Loaded and validated {} model records from file '{}'",
        records.len(),
        file_name
    );
    Ok(records)
}

/// write a model text, e.g. a pruned model, to a file
pub fn save_model_to_file(file_name: &str, model_text: &str) -> Result<(), NetworkError> {
    fs::write(file_name, model_text)?;
    info!("model written to '{}'", file_name);
    Ok(())
}
