use thiserror::Error;

pub type LinkerResult<T> = Result<T, LinkerError>;

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("required column {column:?} not found in {file}")]
    Schema { file: String, column: String },

    #[error("failed to write workbook {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to archive {file}: {source}")]
    Archive {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bundle error: {0}")]
    Bundle(String),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("layout error: {0}")]
    Layout(String),
}
