// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![allow(clippy::too_many_arguments)]

//! # restable
//!
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](LICENSE-APACHE)
//!
//! A model of Android compiled resources: resource names and identifiers, device
//! configurations, an interning string pool, the polymorphic value model and the resource
//! table that holds them. On top of the model sit fluent builders that assemble tables,
//! values, split configurations and XML documents for tests and fixtures.
//!
//! ## Features
//!
//! - **Resource table** - One canonical insertion path with name, id and collision checks
//! - **Configurations** - Qualifier strings parsed into [`config::ConfigDescription`]
//! - **Value model** - References, strings, primitives, files, attributes, styles, styleables
//! - **Symbols** - Cached lookups over tables and external sources, with name mangling
//! - **Fixture builders** - Fail-fast façades for tables, values, contexts and XML
//! - **Split artifacts** - Post-processing configurations resolved into output artifacts
//!
//! ## Quick Start
//!
//! ```rust
//! use restable::prelude::*;
//!
//! let table = ResourceTableBuilder::new()
//!     .add_string("app:string/app_name", "Hello")
//!     .add_simple("app:id/toolbar")
//!     .build();
//!
//! let package = table.find_package("app").unwrap();
//! assert_eq!(package.types().len(), 2);
//!
//! let name = get_value::<StringValue>(&table, "app:string/app_name").unwrap();
//! assert_eq!(&*name.value, "Hello");
//! ```
//!
//! ### Adding resources without the builders
//!
//! Library code goes through [`table::ResourceTable::add_resource`], which reports failures as
//! [`Error`] values and records details in a [`diagnostics::Diagnostics`] collector.
//!
//! ```rust
//! use restable::config::ConfigDescription;
//! use restable::diagnostics::Diagnostics;
//! use restable::resource::ResourceName;
//! use restable::table::{NewResourceBuilder, ResourceTable};
//! use restable::values::Id;
//!
//! let diagnostics = Diagnostics::new();
//! let mut table = ResourceTable::new();
//! let name = ResourceName::parse("app:id/header")?;
//!
//! table.add_resource(
//!     NewResourceBuilder::new(name.clone())
//!         .set_value(Id::default(), ConfigDescription::default())
//!         .build(),
//!     &diagnostics,
//! )?;
//! assert!(table.find_resource(&name).is_some());
//! # Ok::<(), restable::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`resource`] - Names, types, identifiers and sources
//! - [`config`] - Device configuration qualifiers
//! - [`strings`] - Interning string pool
//! - [`values`] - The resource value model
//! - [`table`] - The resource table
//! - [`symbols`] - Symbol lookup and name mangling
//! - [`configuration`] - Post-processing (split) configuration
//! - [`xml`] - XML DOM inflation
//! - [`io`] / [`util`] - Input files and filesystem helpers
//! - [`testing`] - Fixture builders
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run resource_name --release
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use restable::prelude::*;
///
/// let name = ResourceName::parse("app:string/title")?;
/// assert_eq!(name.type_, ResourceType::String);
/// # Ok::<(), restable::Error>(())
/// ```
pub mod prelude;

/// Device configuration qualifiers.
pub mod config;

/// Split and post-processing configuration, and its resolution into output artifacts.
pub mod configuration;

/// The environment a compilation step runs in.
pub mod context;

/// Collected warnings and errors.
pub mod diagnostics;

/// Handles to files referenced by resources.
pub mod io;

/// Resource names, types and identifiers.
pub mod resource;

/// Interning string pool.
pub mod strings;

/// Symbol tables, symbol sources and name mangling.
pub mod symbols;

/// The resource table.
pub mod table;

/// Fixture builders for tests.
pub mod testing;

/// Filesystem helpers.
pub mod util;

/// The resource value model.
pub mod values;

/// XML documents.
pub mod xml;

/// `restable` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use restable::{config::ConfigDescription, Result};
///
/// fn landscape() -> Result<ConfigDescription> {
///     ConfigDescription::parse("land")
/// }
/// assert!(landscape().is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `restable` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use restable::{resource::ResourceName, Error};
///
/// match ResourceName::parse("no-type") {
///     Err(Error::InvalidResourceName(name)) => assert_eq!(name, "no-type"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub use error::Error;
