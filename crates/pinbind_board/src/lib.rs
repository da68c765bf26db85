//! Board resource model for pinbind.
//!
//! A [`BoardCatalog`] is the immutable description of one target board: its
//! physical I/O resources (LEDs, buttons, switches, raw pins and buses,
//! seven-segment displays, RGB LEDs) and the synthetic resources every board
//! offers (all-zero, all-one, constant, unconnected).
//!
//! The central question this crate answers is
//! [`BoardResource::is_compatible`]: can a signal of a given width, direction
//! and acceptable type be served by a given resource?
//!
//! ```
//! use pinbind_board::{BoardCatalogBuilder, IoType, IoWidth, ResourceSpec};
//!
//! let mut builder = BoardCatalogBuilder::new("demo");
//! let led = builder
//!     .add(ResourceSpec::new("LED0", IoType::Led, ["A1"]))
//!     .unwrap();
//! let catalog = builder.build();
//! assert!(catalog[led].is_compatible(IoWidth::output(1), IoType::Led));
//! assert!(!catalog[led].is_compatible(IoWidth::input(1), IoType::Led));
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod electrical;
pub mod error;
pub mod ids;
pub mod io_type;
pub mod resource;
pub mod width;

pub use catalog::{BoardCatalog, BoardCatalogBuilder};
pub use electrical::{ActiveLevel, Electrical, PullBehavior};
pub use error::CatalogError;
pub use ids::ResourceId;
pub use io_type::{first_of_class, IoType, WidthClass, WidthRange};
pub use resource::{BoardResource, ResourceSpec};
pub use width::{Direction, IoWidth};
