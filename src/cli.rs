//! Command line interface layer.
//!
//! This module defines argument parsing (`args`) and the orchestration
//! logic (`runner`) for the single-file and batch conversion flows. The
//! `convert_img` and `convert_imgs` binaries are thin wrappers over it; for
//! programmatic use, prefer the `image_pipeline` and `batch` modules.

pub mod args;
pub mod runner;

pub use args::{ConvertImgArgs, ConvertImgsArgs, ConvertOptions};
pub use runner::{run_batch, run_single};
