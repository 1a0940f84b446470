use dbdoc_api::SourceError;
use dbdoc_engine::EngineError;
use dbdoc_format_xml::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum DbdocError {
    #[error("{0}")]
    Config(String),

    #[error("target file '{0}' already exists, use -y to overwrite")]
    OutputExists(String),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
