/// Data layer: catalog, parsing, splitting and export.
///
/// Architecture:
/// ```text
///   input dir
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  recursive scan → sorted Vec<PathBuf>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Matrix
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  split_columns → Segments
///   └──────────┘
///        │  + labels
///        ▼
///   ┌──────────┐
///   │  export   │  ExportRecord → <output dir>/<base>.json
///   └──────────┘
/// ```

pub mod catalog;
pub mod export;
pub mod loader;
pub mod model;
