use std::fmt;

#[derive(Debug)]
pub enum BankError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl std::error::Error for BankError {}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::IoError(e) => write!(f, "IO error: {}", e),
            BankError::CsvError(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        BankError::IoError(err)
    }
}

impl From<csv::Error> for BankError {
    fn from(err: csv::Error) -> Self {
        BankError::CsvError(err)
    }
}
