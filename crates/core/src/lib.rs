//! Shelf Core Library
//!
//! This crate provides the core functionality for shelf, a terminal snippet
//! manager that stores reusable shell command templates and resolves their
//! placeholder parameters before execution.
//!
//! # Key Features
//!
//! - **Snippet Storage**: Load, validate and save YAML-based snippet files
//! - **Parameter Engine**: Extract `<name=default>` placeholders from command
//!   templates and substitute resolved values back in
//! - **Choice Defaults**: Placeholders may carry a cyclable list of options
//! - **Execution**: Run resolved command lines through the user's shell
//! - **Error Handling**: Structured error types for all failure modes
//!
//! # Examples
//!
//! Extracting parameters and substituting values:
//!
//! ```
//! use std::collections::HashMap;
//! use shelf_core::params::{extract_parameters, substitute};
//!
//! let template = "ssh <user=root>@<host>";
//! let params = extract_parameters(template);
//! assert_eq!(params.len(), 2);
//!
//! let mut values = HashMap::new();
//! values.insert("user".to_string(), "deploy".to_string());
//! values.insert("host".to_string(), "web01".to_string());
//! assert_eq!(substitute(template, &values), "ssh deploy@web01");
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod params;
pub mod snippet;
