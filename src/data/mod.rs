/// Data layer: core types, path resolution, loading, sampling and writing.
///
/// Architecture:
/// ```text
///  (experiment key, gene pool id)
///        │
///        ▼
///   ┌──────────┐
///   │  paths    │  PathKey → .../gene_pool_<id>/fitness.csv
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  whole-file read, lenient parse → RecordSet
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep generation % interval == 0
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  "a,b,c,\n" rows → <key>_<id>.csv
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod paths;
pub mod writer;
