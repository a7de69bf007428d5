//! Aggregation of source units and availability resolution.
//!
//! The [`Loader`] owns every [`SourceUnit`] it has been given and a shared
//! [`Repository`]. For any interface it can list the descriptors that are
//! currently **available**: those providing the interface whose requirements
//! all have at least one instance in the repository. Availability is never
//! cached; each query is answered against the repository as it is at the time
//! of the call, because a single instantiation can make any number of other
//! classes available.

use std::sync::{ Arc, PoisonError, RwLock, RwLockReadGuard };
use itertools::Itertools ;
use thiserror::Error ;

use crate::interface::InterfaceKey ;
use crate::descriptor::{ ClassDescriptor, FactoryError, Instance };
use crate::repository::{ Dependencies, Repository };
use crate::source_unit::SourceUnit ;
use crate::utils::PartialSuccess ;



/// Errors that can occur while adding sources to or instantiating classes
/// through a [`Loader`].
///
/// None of these leave the loader or its repository modified.
#[derive( Debug, Error )]
pub enum LoaderError {

	/// A source with this name was already added. The new unit is not stored.
	#[error( "A source named '{0}' is already registered" )]
	DuplicateName( String ),

	/// The class was asked for while some of its requirements had no instance.
	#[error( "Cannot instantiate {class}, missing: {}", .missing.iter().join( ", " ))]
	UnsatisfiedDependency { class: &'static str, missing: Vec<InterfaceKey> },

	/// The class's own factory failed. Nothing was registered.
	#[error( "Factory of {class} failed: {source}" )]
	FactoryFailed { class: &'static str, source: FactoryError },

}

/// Trait for supplying source units from a user-defined origin.
///
/// Implement this to feed the loader from wherever classes come from: a
/// directory of modules, an embedded table, or classes compiled into the host.
/// The loader only cares about the resulting named units, which it adds in the
/// order they are yielded.
pub trait SourceDiscovery {

	/// Error type for discovery failures.
	type Error: std::error::Error ;
	/// Named units found by this discovery.
	type Sources: IntoIterator<Item = ( String, SourceUnit )>;

	/// Finds the units to be added.
	///
	/// # Errors
	/// Implementations may fail if the underlying origin is unavailable.
	fn discover( self ) -> Result<Self::Sources, Self::Error> ;

}

/// Registry of loadable classes bound to one [`Repository`].
///
/// Loaders are independent of each other; there is no process-wide state.
/// All methods take `&self` so that several [`InterfaceView`]( crate::InterfaceView )s
/// can share one loader. Mutation follows a single-writer model: sources and
/// instances are only added by explicit calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc ;
/// use class_loader::{ Loader, SourceUnit, InterfaceKey };
///
/// trait Car: Send + Sync { fn kind( &self ) -> &'static str ; }
/// struct Chevy ;
/// impl Car for Chevy { fn kind( &self ) -> &'static str { "Chevrolet" } }
///
/// let mut unit = SourceUnit::new();
/// unit.make_plain_available::<Chevy, dyn Car>(|| Chevy, | car | car ).unwrap();
///
/// let loader = Loader::new();
/// loader.add_source( "Local Classes", unit ).unwrap();
///
/// let cars = loader.available( &InterfaceKey::of::<dyn Car>() );
/// assert_eq!( cars.len(), 1 );
///
/// let instance = loader.instantiate( &cars[0] ).unwrap();
/// assert_eq!( instance.get::<dyn Car>().unwrap().kind(), "Chevrolet" );
/// assert_eq!( loader.repository().all::<dyn Car>().len(), 1 );
/// ```
#[derive( Default )]
pub struct Loader {
	sources: RwLock<Vec<( String, SourceUnit )>>,
	repository: Repository,
}

impl Loader {

	/// Creates a loader with no sources and an empty repository.
	pub fn new() -> Self { Self::default() }

	/// Creates a loader around a repository the host has already populated.
	pub fn with_repository( repository: Repository ) -> Self {
		Self { sources: RwLock::default(), repository }
	}

	/// The repository instances are registered in.
	#[inline] pub fn repository( &self ) -> &Repository { &self.repository }

	/// Adds a source unit under `name`.
	///
	/// # Errors
	/// Returns [`LoaderError::DuplicateName`] if a unit with the same name was
	/// already added; the loader keeps the first one.
	pub fn add_source( &self, name: impl Into<String>, unit: SourceUnit ) -> Result<(), LoaderError> {
		let name = name.into();
		let mut sources = self.sources.write().unwrap_or_else( PoisonError::into_inner );
		if sources.iter().any(|( existing, _ )| *existing == name ) {
			tracing::warn!( source = %name, "Rejected source with duplicate name" );
			return Err( LoaderError::DuplicateName( name ));
		}
		tracing::info!( source = %name, classes = unit.len(), "Added source" );
		sources.push(( name, unit ));
		Ok(())
	}

	/// Adds every unit in order, collecting failures instead of stopping at the
	/// first one. Returns the number of units added.
	pub fn add_sources<N: Into<String>>(
		&self,
		sources: impl IntoIterator<Item = ( N, SourceUnit )>,
	) -> PartialSuccess<usize, LoaderError> {
		let ( added, errors ) = sources.into_iter()
			.map(|( name, unit )| self.add_source( name, unit ))
			.partition_result::<Vec<_>, Vec<_>, _, _>();
		( added.len(), errors )
	}

	/// Runs `discovery` and adds the units it yields, see [`add_sources`]( Self::add_sources ).
	///
	/// # Errors
	/// Returns the discovery's own error if it fails; no unit is added then.
	pub fn discover<D: SourceDiscovery>( &self, discovery: D ) -> Result<PartialSuccess<usize, LoaderError>, D::Error> {
		Ok( self.add_sources( discovery.discover()? ))
	}

	/// Names of the added sources, in the order they were added.
	pub fn source_names( &self ) -> Vec<String> {
		self.sources().iter().map(|( name, _ )| name.clone() ).collect()
	}

	/// Every interface provided by at least one descriptor, in first-seen order.
	pub fn interfaces( &self ) -> Vec<InterfaceKey> {
		self.sources().iter()
			.flat_map(|( _, unit )| unit.descriptors() )
			.flat_map(| descriptor | descriptor.provides().copied() )
			.unique()
			.collect()
	}

	/// Every descriptor providing `key`, available or not.
	///
	/// Ordered by source registration order, then by descriptor order within
	/// each source.
	pub fn descriptors( &self, key: &InterfaceKey ) -> Vec<Arc<ClassDescriptor>> {
		self.sources().iter()
			.flat_map(|( _, unit )| unit.descriptors_for( key ))
			.collect()
	}

	/// Descriptors providing `key` whose requirements are all currently met.
	///
	/// Ordered as [`descriptors`]( Self::descriptors ). Two calls with no
	/// instantiation in between return the same sequence.
	pub fn available( &self, key: &InterfaceKey ) -> Vec<Arc<ClassDescriptor>> {
		let available = self.repository.satisfying( self.descriptors( key ));
		tracing::trace!( interface = %key, count = available.len(), "Computed availability" );
		available
	}

	/// Typed form of [`available`]( Self::available ).
	pub fn available_for<I: ?Sized + 'static>( &self ) -> Vec<Arc<ClassDescriptor>> {
		self.available( &InterfaceKey::of::<I>() )
	}

	/// Requirements of `descriptor` that currently have no instance.
	pub fn missing( &self, descriptor: &ClassDescriptor ) -> Vec<InterfaceKey> {
		self.repository.missing( descriptor.requires() )
	}

	/// Returns `true` if every requirement of `descriptor` is currently met.
	pub fn is_available( &self, descriptor: &ClassDescriptor ) -> bool {
		self.missing( descriptor ).is_empty()
	}

	/// Constructs the class described by `descriptor`.
	///
	/// The factory gets read access to the repository to pull its dependencies.
	/// Once it returns successfully the new instance is registered under every
	/// interface the descriptor provides, which may make further classes
	/// available.
	///
	/// # Errors
	/// - [`LoaderError::UnsatisfiedDependency`] if a requirement has no instance;
	///   the factory is not called
	/// - [`LoaderError::FactoryFailed`] if the factory fails
	///
	/// In both cases nothing is registered.
	pub fn instantiate( &self, descriptor: &ClassDescriptor ) -> Result<Instance, LoaderError> {
		let class = descriptor.class_name();

		let missing = self.missing( descriptor );
		if !missing.is_empty() {
			tracing::warn!( class, missing = %missing.iter().join( ", " ), "Refused to instantiate class with unmet requirements" );
			return Err( LoaderError::UnsatisfiedDependency { class, missing });
		}

		let instance = descriptor.construct( Dependencies::new( &self.repository )).map_err(| source | {
			tracing::warn!( class, error = %source, "Class factory failed" );
			LoaderError::FactoryFailed { class, source }
		})?;

		self.repository.insert( &instance );
		tracing::info!( class, description = descriptor.description(), "Instantiated class" );
		Ok( instance )
	}

	fn sources( &self ) -> RwLockReadGuard<'_, Vec<( String, SourceUnit )>> {
		self.sources.read().unwrap_or_else( PoisonError::into_inner )
	}

}

impl std::fmt::Debug for Loader {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Loader" )
			.field( "sources", &self.source_names() )
			.field( "repository", &self.repository )
			.finish()
	}
}
