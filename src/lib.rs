//! Toastwire - Windows toast notifications
//!
//! This crate shows toast notifications in the Windows notification center:
//! it registers an application identity (AUMI, Start menu shortcut, COM
//! activator), compiles toast templates into the payload the OS expects,
//! and routes toast clicks back to the application.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Templates, argument codec, identities, payload document, errors
//! - **Application**: Toaster facade, payload compiler, shortcut and activation
//!   registration, and the port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (WinRT, COM, shell links,
//!   registry, config file, in-memory test doubles)
//! - **CLI**: The console sample, argument parsing, and config management

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
