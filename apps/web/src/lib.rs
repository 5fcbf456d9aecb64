//! Browser binding for the PDF upload page.
//!
//! The page loads the wasm module and calls `initialize` once the DOM is
//! ready:
//!
//! ```js
//! import init, { initialize } from "./pkg/upload_web.js";
//! await init();
//! initialize(document.getElementById("app"), JSON.stringify({ rendering: "text" }));
//! ```
//!
//! Both arguments are optional; without them the whole document is bound with
//! the default element IDs.

mod app;
mod config;
mod dom;
mod fetch;
mod logging;
mod page;

pub use app::initialize;
pub use config::{BindingsError, PageBindings};
