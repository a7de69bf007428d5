//! Shared store of constructed instances.
//!
//! The [`Repository`] holds every instance the loader has constructed (and any
//! the host placed there up front), indexed by the interfaces they were
//! registered under. Factories read their dependencies out of it through the
//! read-only [`Dependencies`] facade.

use std::any::Any ;
use std::collections::HashMap ;
use std::sync::{ Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard };
use thiserror::Error ;

use crate::interface::InterfaceKey ;
use crate::descriptor::{ ClassDescriptor, Instance };



/// A type-erased `Arc<I>` for some interface `I`.
pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

/// Error returned by lookups into a [`Repository`].
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum RepositoryError {
	/// No instance has been registered under the interface.
	#[error( "No instance of {0} is registered" )]
	Unsatisfied( InterfaceKey ),
}

/// Store of constructed instances, indexed by interface.
///
/// An instance is stored once per interface it provides. Each entry is a handle
/// to the same underlying object, so an instance registered as both a `Garage`
/// and a `Structure` is one shared object, not two copies.
///
/// The repository only grows. Handles returned from [`first`]( Self::first ) and
/// [`all`]( Self::all ) are shared references into it; once an instance is
/// registered the repository keeps it alive for its own lifetime.
///
/// All access goes through a single lock: reads take a snapshot under the read
/// lock and every insertion of one instance happens under one write lock, so a
/// reader never observes an instance registered under only some of its
/// interfaces.
///
/// ```
/// use std::sync::Arc ;
/// use class_loader::Repository ;
///
/// trait Greeting: Send + Sync { fn text( &self ) -> &str ; }
/// struct Hello ;
/// impl Greeting for Hello { fn text( &self ) -> &str { "hello" } }
///
/// let repository = Repository::new();
/// assert!( repository.first::<dyn Greeting>().is_err() );
///
/// repository.register::<dyn Greeting>( Arc::new( Hello ));
/// assert_eq!( repository.first::<dyn Greeting>().unwrap().text(), "hello" );
/// ```
#[derive( Default )]
pub struct Repository {
	instances: RwLock<HashMap<InterfaceKey, Vec<Erased>>>,
}

impl Repository {

	/// Creates an empty repository.
	pub fn new() -> Self { Self::default() }

	/// Appends `instance` to the sequence registered under `I`.
	///
	/// Descriptors requiring `I` may become available as a result.
	pub fn register<I>( &self, instance: Arc<I> )
	where
		I: ?Sized + Send + Sync + 'static,
	{
		let key = InterfaceKey::of::<I>();
		self.write().entry( key ).or_default().push( Arc::new( instance ));
		tracing::debug!( interface = %key, "Registered host instance" );
	}

	/// Returns the earliest registered instance of `I`.
	///
	/// # Errors
	/// Returns [`RepositoryError::Unsatisfied`] if no instance of `I` exists.
	pub fn first<I>( &self ) -> Result<Arc<I>, RepositoryError>
	where
		I: ?Sized + Send + Sync + 'static,
	{
		let key = InterfaceKey::of::<I>();
		self.read()
			.get( &key )
			.and_then(| entries | entries.iter().find_map( downcast::<I> ))
			.ok_or( RepositoryError::Unsatisfied( key ))
	}

	/// Returns every instance of `I` in registration order.
	pub fn all<I>( &self ) -> Vec<Arc<I>>
	where
		I: ?Sized + Send + Sync + 'static,
	{
		self.read()
			.get( &InterfaceKey::of::<I>() )
			.map(| entries | entries.iter().filter_map( downcast::<I> ).collect())
			.unwrap_or_default()
	}

	/// Number of instances registered under `key`.
	pub fn count( &self, key: &InterfaceKey ) -> usize {
		self.read().get( key ).map_or( 0, Vec::len )
	}

	/// Returns `true` if at least one instance is registered under `key`.
	pub fn contains( &self, key: &InterfaceKey ) -> bool { self.count( key ) > 0 }

	/// Returns the keys among `required` that have no instance, observed
	/// against a single snapshot of the repository.
	pub(crate) fn missing<'a>( &self, required: impl IntoIterator<Item = &'a InterfaceKey> ) -> Vec<InterfaceKey> {
		let instances = self.read();
		required.into_iter()
			.filter(| key | instances.get( *key ).is_none_or( Vec::is_empty ))
			.copied()
			.collect()
	}

	/// Keeps the descriptors whose requirements all have an instance, observed
	/// against a single snapshot of the repository.
	pub(crate) fn satisfying( &self, descriptors: impl IntoIterator<Item = Arc<ClassDescriptor>> ) -> Vec<Arc<ClassDescriptor>> {
		let instances = self.read();
		descriptors.into_iter()
			.filter(| descriptor | descriptor.requires().iter().all(| key | instances.get( key ).is_some_and(| entries | !entries.is_empty() )))
			.collect()
	}

	/// Registers a freshly constructed instance under every interface it provides.
	pub(crate) fn insert( &self, instance: &Instance ) {
		let mut instances = self.write();
		instance.handles().for_each(|( key, handle )| instances.entry( *key ).or_default().push( Arc::clone( handle )));
	}

	// Writers push whole entries only, so a poisoned lock still guards a consistent map.
	fn read( &self ) -> RwLockReadGuard<'_, HashMap<InterfaceKey, Vec<Erased>>> {
		self.instances.read().unwrap_or_else( PoisonError::into_inner )
	}

	fn write( &self ) -> RwLockWriteGuard<'_, HashMap<InterfaceKey, Vec<Erased>>> {
		self.instances.write().unwrap_or_else( PoisonError::into_inner )
	}

}

impl std::fmt::Debug for Repository {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_map()
			.entries( self.read().iter().map(|( key, entries )| ( key.name(), entries.len() )))
			.finish()
	}
}

fn downcast<I: ?Sized + Send + Sync + 'static>( handle: &Erased ) -> Option<Arc<I>> {
	handle.downcast_ref::<Arc<I>>().cloned()
}

/// Read-only view of a [`Repository`] handed to factories.
///
/// Factories pull their dependencies through this facade. Inserting the newly
/// constructed instance is the loader's job, done only after the factory
/// returns successfully, so the facade exposes no way to register anything.
#[derive( Debug, Clone, Copy )]
pub struct Dependencies<'r> {
	repository: &'r Repository,
}

impl<'r> Dependencies<'r> {

	pub(crate) fn new( repository: &'r Repository ) -> Self { Self { repository }}

	/// Returns the earliest registered instance of `I`.
	///
	/// # Errors
	/// Returns [`RepositoryError::Unsatisfied`] if no instance of `I` exists.
	#[inline]
	pub fn first<I: ?Sized + Send + Sync + 'static>( &self ) -> Result<Arc<I>, RepositoryError> {
		self.repository.first::<I>()
	}

	/// Returns every instance of `I` in registration order.
	#[inline]
	pub fn all<I: ?Sized + Send + Sync + 'static>( &self ) -> Vec<Arc<I>> {
		self.repository.all::<I>()
	}

	/// Returns `true` if at least one instance of `I` exists.
	#[inline]
	pub fn contains<I: ?Sized + 'static>( &self ) -> bool {
		self.repository.contains( &InterfaceKey::of::<I>() )
	}

}
