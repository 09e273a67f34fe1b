//! pdfdeck - Reorder a working set of PDF files and run bulk assembly
//! operations over the whole set.
//!
//! This library provides:
//!
//! - An ordered, reorderable in-memory file registry
//! - Four bulk operations: merge, split, rotate, remove
//! - Cooperative batching so large splits keep the host responsive
//! - Deterministic artifact naming
//! - A download-sink seam for delivering outputs
//! - Comprehensive error handling
//!
//! # Examples
//!
//! ## Merge a working set
//!
//! ```no_run
//! use pdfdeck::Orchestrator;
//! use pdfdeck::registry::{FileRegistry, InputFile};
//! use pdfdeck::sink::MemorySink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = FileRegistry::new();
//! registry.append([
//!     InputFile::new("a.pdf", "application/pdf", std::fs::read("a.pdf")?),
//!     InputFile::new("b.pdf", "application/pdf", std::fs::read("b.pdf")?),
//! ]);
//!
//! // The drag gesture delivers the new order; apply it before running.
//! registry.reorder(&[1, 0])?;
//!
//! let sink = MemorySink::new();
//! let orchestrator = Orchestrator::new();
//! let report = orchestrator.merge(&registry.snapshot(), &sink).await?;
//! println!(
//!     "Merged {} file(s) into {} page(s)",
//!     report.files_processed, report.pages_processed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Split with custom batching
//!
//! ```no_run
//! use pdfdeck::Orchestrator;
//! use pdfdeck::registry::{FileRegistry, InputFile};
//! use pdfdeck::sink::MemorySink;
//! use std::time::Duration;
//!
//! # async fn example(registry: FileRegistry) -> Result<(), Box<dyn std::error::Error>> {
//! let sink = MemorySink::new();
//! let orchestrator = Orchestrator::with_batching(10, Duration::from_millis(100));
//! let report = orchestrator.split(&registry.snapshot(), &sink).await?;
//! println!("{} output file(s)", report.artifacts_emitted);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod ops;
pub mod output;
pub mod registry;
pub mod sink;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{DeckError, Result};
pub use ops::Orchestrator;
pub use registry::FileRegistry;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
