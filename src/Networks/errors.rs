use thiserror::Error;

/// errors of reaction parsing, counting, canonicalization and pruning
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Malformed reaction '{line}': {reason}")]
    MalformedReaction { line: String, reason: String },
    #[error("Model contains no reactions, portions are undefined")]
    NoReactions,
    #[error("Number of rate constants ({rate_constants}) differs from number of reactions ({reactions})")]
    RateConstantMismatch {
        reactions: usize,
        rate_constants: usize,
    },
    #[error("Malformed rate constant line '{line}'")]
    MalformedRateConstant { line: String },
    #[error("Oracle failure: {0}")]
    Oracle(String),
    #[error("Model store failure: {0}")]
    Store(String),
    #[error("Model '{id}': {source}")]
    InModel {
        id: String,
        #[source]
        source: Box<NetworkError>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl NetworkError {
    pub fn malformed(line: &str, reason: &str) -> Self {
        NetworkError::MalformedReaction {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }
    /// attach the id of the model that failed inside a batch run
    pub fn in_model(self, id: &str) -> Self {
        NetworkError::InModel {
            id: id.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = NetworkError::malformed("A B", "no reaction arrow");
        assert_eq!(e.to_string(), "Malformed reaction 'A B': no reaction arrow");
        let e = NetworkError::RateConstantMismatch {
            reactions: 3,
            rate_constants: 2,
        };
        assert_eq!(
            e.to_string(),
            "Number of rate constants (2) differs from number of reactions (3)"
        );
        let e = NetworkError::NoReactions.in_model("42");
        assert_eq!(
            e.to_string(),
            "Model '42': Model contains no reactions, portions are undefined"
        );
    }
}
