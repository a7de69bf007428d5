//! Interface-scoped handles over a [`Loader`].
//!
//! An [`InterfaceView`] is bound to one interface and one loader. It lists the
//! classes currently available for its interface, loads a chosen class and
//! keeps the resulting instances. How many instances it may keep is set by its
//! [`Cardinality`] parameter: [`SingleView`] holds at most one, [`MultiView`]
//! any number.

use std::marker::PhantomData ;
use std::sync::Arc ;
use thiserror::Error ;

use crate::cardinality::{ self, AtMostOne, Cardinality };
use crate::descriptor::ClassDescriptor ;
use crate::interface::InterfaceKey ;
use crate::loader::{ Loader, LoaderError };



/// Errors that can occur when loading through or indexing into an [`InterfaceView`].
///
/// A failed call leaves both the view and the loader unchanged.
#[derive( Debug, Error )]
pub enum ViewError {
	/// The view already holds as many instances as its cardinality allows.
	#[error( "View over {0} is already loaded" )]
	AlreadyLoaded( InterfaceKey ),
	/// Index past the number of loaded instances.
	#[error( "Index {index} out of range for {len} loaded instances" )]
	IndexOutOfRange { index: usize, len: usize },
	/// The descriptor does not provide the view's interface.
	#[error( "Class {class} does not provide {interface}" )]
	NotProvided { class: &'static str, interface: InterfaceKey },
	/// Instantiation failed in the loader.
	#[error( "Load failed: {0}" )]
	Loader( #[from] LoaderError ),
}

/// A view holding at most one instance.
pub type SingleView<'l, I> = InterfaceView<'l, I, AtMostOne>;

/// A view holding any number of instances.
pub type MultiView<'l, I> = InterfaceView<'l, I, cardinality::Any>;

/// Typed handle bound to the interface `I` of one [`Loader`].
///
/// Available classes are recomputed from the loader on every call, so a view
/// created before its dependencies exist sees new classes as soon as they
/// become available.
///
/// # Example
///
/// ```
/// use class_loader::{ Loader, SourceUnit, MultiView };
///
/// trait Car: Send + Sync { fn kind( &self ) -> &'static str ; }
/// struct Chevy ;
/// struct Honda ;
/// impl Car for Chevy { fn kind( &self ) -> &'static str { "Chevrolet" } }
/// impl Car for Honda { fn kind( &self ) -> &'static str { "Honda" } }
///
/// let mut unit = SourceUnit::new();
/// unit.make_plain_available::<Chevy, dyn Car>(|| Chevy, | car | car ).unwrap()
/// 	.make_plain_available::<Honda, dyn Car>(|| Honda, | car | car ).unwrap();
///
/// let loader = Loader::new();
/// loader.add_source( "Local Classes", unit ).unwrap();
///
/// let mut cars = MultiView::<dyn Car>::new( &loader );
/// for class in cars.available() {
/// 	cars.load( &class ).unwrap();
/// }
///
/// assert_eq!( cars[0].kind(), "Chevrolet" );
/// assert_eq!( cars[1].kind(), "Honda" );
/// ```
pub struct InterfaceView<'l, I: ?Sized, C = cardinality::Any> {
	loader: &'l Loader,
	key: InterfaceKey,
	loaded: Vec<Arc<I>>,
	_cardinality: PhantomData<C>,
}

impl<'l, I, C> InterfaceView<'l, I, C>
where
	I: ?Sized + Send + Sync + 'static,
	C: Cardinality,
{

	/// Creates an empty view over `I` bound to `loader`.
	pub fn new( loader: &'l Loader ) -> Self {
		Self { loader, key: InterfaceKey::of::<I>(), loaded: Vec::new(), _cardinality: PhantomData }
	}

	/// The interface this view is bound to.
	#[inline] pub fn interface( &self ) -> InterfaceKey { self.key }

	/// The loader this view is bound to.
	#[inline] pub fn loader( &self ) -> &'l Loader { self.loader }

	/// Snapshot of the classes currently available for this interface.
	///
	/// The snapshot does not change when instances are added afterwards; call
	/// again to observe them.
	pub fn available( &self ) -> Vec<Arc<ClassDescriptor>> {
		self.loader.available( &self.key )
	}

	/// Number of classes [`available`]( Self::available ) would currently return.
	pub fn count_available( &self ) -> usize { self.available().len() }

	/// The first currently available class, if any.
	pub fn first_available( &self ) -> Option<Arc<ClassDescriptor>> {
		self.available().into_iter().next()
	}

	/// Returns `true` if the view holds as many instances as it may.
	pub fn is_full( &self ) -> bool { !C::admits( self.loaded.len() ) }

	/// Instantiates `descriptor` through the loader and keeps the new instance.
	///
	/// # Errors
	/// - [`ViewError::AlreadyLoaded`] if the view is full
	/// - [`ViewError::NotProvided`] if `descriptor` does not provide this interface
	/// - [`ViewError::Loader`] if instantiation fails
	///
	/// The first two are checked before anything is constructed.
	pub fn load( &mut self, descriptor: &ClassDescriptor ) -> Result<Arc<I>, ViewError> {
		if self.is_full() {
			tracing::debug!( interface = %self.key, class = descriptor.class_name(), "Refused to load into a full view" );
			return Err( ViewError::AlreadyLoaded( self.key ));
		}
		let not_provided = || ViewError::NotProvided { class: descriptor.class_name(), interface: self.key };
		if !descriptor.provides_interface( &self.key ) { return Err( not_provided() ) }

		let handle = self.loader.instantiate( descriptor )?
			.get::<I>()
			.ok_or_else( not_provided )?;
		self.loaded.push( Arc::clone( &handle ));
		Ok( handle )
	}

	/// Loads the first available class, returning `None` if there is none.
	///
	/// # Errors
	/// Fails as [`load`]( Self::load ).
	pub fn load_first( &mut self ) -> Result<Option<Arc<I>>, ViewError> {
		match self.first_available() {
			Some( descriptor ) => self.load( &descriptor ).map( Some ),
			None => Ok( None ),
		}
	}

	/// The loaded instance at `index`.
	///
	/// # Errors
	/// Returns [`ViewError::IndexOutOfRange`] if `index` is past the loaded count.
	pub fn get( &self, index: usize ) -> Result<&Arc<I>, ViewError> {
		self.loaded.get( index ).ok_or( ViewError::IndexOutOfRange { index, len: self.loaded.len() })
	}

	/// Loaded instances in load order.
	#[inline] pub fn loaded( &self ) -> &[Arc<I>] { &self.loaded }

	/// Iterates over loaded instances in load order.
	pub fn iter( &self ) -> std::slice::Iter<'_, Arc<I>> { self.loaded.iter() }

	/// Number of loaded instances.
	#[inline] pub fn len( &self ) -> usize { self.loaded.len() }

	/// Returns `true` if nothing has been loaded through this view.
	#[inline] pub fn is_empty( &self ) -> bool { self.loaded.is_empty() }

}

impl<I: ?Sized + Send + Sync + 'static> InterfaceView<'_, I, AtMostOne> {
	/// The held instance, if one has been loaded.
	pub fn instance( &self ) -> Option<&Arc<I>> { self.loaded.first() }
}

impl<I: ?Sized, C> std::ops::Index<usize> for InterfaceView<'_, I, C> {
	type Output = Arc<I>;

	fn index( &self, index: usize ) -> &Self::Output { &self.loaded[index] }
}

impl<'a, I: ?Sized, C> IntoIterator for &'a InterfaceView<'_, I, C> {
	type Item = &'a Arc<I>;
	type IntoIter = std::slice::Iter<'a, Arc<I>>;

	fn into_iter( self ) -> Self::IntoIter { self.loaded.iter() }
}

impl<I: ?Sized, C> std::fmt::Debug for InterfaceView<'_, I, C> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "InterfaceView" )
			.field( "interface", &self.key )
			.field( "cardinality", &std::any::type_name::<C>() )
			.field( "loaded", &self.loaded.len() )
			.finish_non_exhaustive()
	}
}
