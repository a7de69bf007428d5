//! A dependency-aware class registry for building modular applications.
//!
//! Components are described by **class descriptors**. Each descriptor declares
//! the interfaces its class **provides** and the interfaces it **requires**.
//! `class_loader` tracks which classes can currently be constructed - those
//! whose requirements all have an instance already - constructs them on
//! request, and hands each new instance references to the instances it depends
//! on.
//!
//! # Core Concepts
//!
//! - [`InterfaceKey`]: Identity of an interface, derived from a Rust type
//! 	(usually a trait object such as `dyn Garage`).
//!
//! - [`ClassDescriptor`]: A factory plus a description, the provided interfaces
//! 	and the required interfaces of one class. Classes either implement
//! 	[`Extension`] to declare themselves, or are registered as plain classes
//! 	with [`ClassDescriptor::plain`].
//!
//! - [`SourceUnit`]: An ordered group of descriptors contributed by one origin.
//!
//! - [`Repository`]: The store of constructed instances, indexed by interface.
//! 	Factories read it through [`Dependencies`].
//!
//! - [`Loader`]: Owns the source units and the repository. Computes which
//! 	descriptors are **available** for an interface and instantiates them.
//!
//! - [`InterfaceView`]: A typed handle over one interface of a loader.
//! 	Cardinality is expressed with marker types in [`crate::cardinality`]:
//! 	- [`SingleView`] ( [`cardinality::AtMostOne`] ) - holds zero or one instance
//! 	- [`MultiView`] ( [`cardinality::Any`] ) - holds any number of instances
//!
//! # Example
//!
//! ```
//! use std::sync::Arc ;
//! use class_loader::{
//! 	Loader, SourceUnit, SingleView, Extension, DescriptorBuilder, Dependencies, FactoryError,
//! };
//!
//! trait Structure: Send + Sync { fn name( &self ) -> String ; }
//! trait Garage: Structure {}
//! trait House: Structure { fn garage_name( &self ) -> String ; }
//!
//! // A garage depends on nothing.
//! struct TwoCarGarage ;
//! impl Structure for TwoCarGarage { fn name( &self ) -> String { "a two car garage".into() } }
//! impl Garage for TwoCarGarage {}
//!
//! impl Extension for TwoCarGarage {
//! 	fn declare( class: DescriptorBuilder<Self> ) -> DescriptorBuilder<Self> {
//! 		class.describe( "A 2 car garage" )
//! 			.provide::<dyn Garage>(| garage | garage )
//! 			.provide::<dyn Structure>(| garage | garage )
//! 	}
//! 	fn generate( _: Dependencies<'_> ) -> Result<Self, FactoryError> { Ok( Self ) }
//! }
//!
//! // A house can only be built once some garage exists.
//! struct BasicHouse { garage: Arc<dyn Garage> }
//! impl Structure for BasicHouse { fn name( &self ) -> String { "some sort of house".into() } }
//! impl House for BasicHouse { fn garage_name( &self ) -> String { self.garage.name() } }
//!
//! impl Extension for BasicHouse {
//! 	fn declare( class: DescriptorBuilder<Self> ) -> DescriptorBuilder<Self> {
//! 		class.describe( "A basic house" )
//! 			.provide::<dyn House>(| house | house )
//! 			.provide::<dyn Structure>(| house | house )
//! 			.require::<dyn Garage>()
//! 	}
//! 	fn generate( dependencies: Dependencies<'_> ) -> Result<Self, FactoryError> {
//! 		Ok( Self { garage: dependencies.first::<dyn Garage>()? })
//! 	}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Local classes are grouped into a unit like any discovered module would be.
//! let mut unit = SourceUnit::new();
//! unit.make_available::<TwoCarGarage>()?
//! 	.make_available::<BasicHouse>()?;
//!
//! let loader = Loader::new();
//! loader.add_source( "Local Classes", unit )?;
//!
//! let mut garage = SingleView::<dyn Garage>::new( &loader );
//! let mut house = SingleView::<dyn House>::new( &loader );
//!
//! // No house is available until a garage has been constructed.
//! assert_eq!( house.count_available(), 0 );
//! assert_eq!( garage.count_available(), 1 );
//!
//! garage.load_first()?;
//! assert_eq!( house.count_available(), 1 );
//!
//! // The house receives the garage from the repository.
//! house.load_first()?;
//! assert_eq!( house.instance().unwrap().garage_name(), "a two car garage" );
//!
//! // One garage and one house, both registered as structures too.
//! assert_eq!( loader.repository().all::<dyn Structure>().len(), 2 );
//! # Ok(())
//! # }
//! ```
//!
//! # Availability
//!
//! A descriptor is available when every interface it requires has at least one
//! instance in the repository. Availability is computed on every query against
//! the repository's current contents and is monotone: instances are never
//! removed, so a class that became available stays available. Listing order is
//! deterministic - sources in the order they were added, then descriptors in
//! the order they were added to their unit.
//!
//! # Errors
//!
//! Every failing operation returns an error value and leaves the loader and
//! repository as they were. In particular, an instance is registered only
//! after its factory returns successfully, so a failing factory never leaves a
//! half-registered instance behind.
//!
//! # Logging
//!
//! The crate reports through [`tracing`](https://docs.rs/tracing): added
//! sources and instantiated classes at `info`, refusals at `warn` or `debug`,
//! availability queries at `trace`. It never installs a subscriber.

mod interface ;
mod descriptor ;
mod repository ;
mod source_unit ;
mod loader ;
mod view ;
mod utils ;
pub mod cardinality ;

pub use interface::InterfaceKey ;
pub use descriptor::{ ClassDescriptor, DescriptorBuilder, DescriptorError, DescriptorKind, Extension, FactoryError, Instance };
pub use repository::{ Repository, RepositoryError, Dependencies };
pub use source_unit::{ SourceUnit, SourceError };
pub use loader::{ Loader, LoaderError, SourceDiscovery };
pub use view::{ InterfaceView, SingleView, MultiView, ViewError };
pub use utils::PartialSuccess ;
