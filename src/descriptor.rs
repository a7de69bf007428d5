//! Class descriptor types.
//!
//! A [`ClassDescriptor`] is the static metadata of one constructible class: a
//! factory, a free-text description, the interfaces the class **provides** and
//! the interfaces it **requires**. Provisions declare under which interfaces a
//! constructed instance is registered; requirements declare which interfaces
//! must already have an instance before the class can be constructed.

use std::sync::Arc ;
use itertools::Itertools ;
use nonempty_collections::NEVec ;
use pipe_trait::Pipe ;
use thiserror::Error ;

use crate::interface::InterfaceKey ;
use crate::repository::{ Dependencies, Erased };



/// Error type factories may fail with.
///
/// Boxed so that factories can use `?` on dependency lookups and on their own
/// error types alike.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

type Factory = Box<dyn Fn( Dependencies<'_> ) -> Result<Instance, FactoryError> + Send + Sync>;
type TypedFactory<T> = Box<dyn Fn( Dependencies<'_> ) -> Result<T, FactoryError> + Send + Sync>;
type Cast<T> = Box<dyn Fn( &Arc<T> ) -> Erased + Send + Sync>;

/// Error that can occur while building a [`ClassDescriptor`].
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum DescriptorError {
	/// A class must provide at least one interface to be loadable.
	#[error( "Class {0} does not provide any interface" )]
	NothingProvided( &'static str ),
	/// The same interface was declared as provided more than once.
	#[error( "Class {0} provides {1} more than once" )]
	ProvidedTwice( &'static str, InterfaceKey ),
}

/// How a class was made loadable.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum DescriptorKind {
	/// The class declares its own provisions and requirements, see [`Extension`].
	Extension,
	/// A plain class registered under a single interface, with no requirements
	/// and a constructor that never looks at the repository.
	Plain,
}

/// Metadata and factory for one loadable class.
///
/// Descriptors are immutable once built. They are handed to a
/// [`SourceUnit`]( crate::SourceUnit ) which owns them for the lifetime of the
/// [`Loader`]( crate::Loader ) it is added to.
///
/// # Example
///
/// ```
/// use std::sync::Arc ;
/// use class_loader::{ ClassDescriptor, InterfaceKey };
///
/// trait Garage: Send + Sync { fn name( &self ) -> String ; }
/// trait House: Send + Sync { fn garage_name( &self ) -> String ; }
///
/// struct SmallHouse { garage: Arc<dyn Garage> }
/// impl House for SmallHouse {
/// 	fn garage_name( &self ) -> String { self.garage.name() }
/// }
///
/// let descriptor = ClassDescriptor::builder(| dependencies | Ok( SmallHouse {
/// 	garage: dependencies.first::<dyn Garage>()?,
/// }))
/// 	.describe( "A basic house" )
/// 	.provide::<dyn House>(| house | house )
/// 	.require::<dyn Garage>()
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!( descriptor.description(), "A basic house" );
/// assert!( descriptor.provides_interface( &InterfaceKey::of::<dyn House>() ));
/// assert_eq!( descriptor.requires(), &[ InterfaceKey::of::<dyn Garage>() ]);
/// ```
pub struct ClassDescriptor {
	class_name: &'static str,
	description: String,
	kind: DescriptorKind,
	provides: NEVec<InterfaceKey>,
	requires: Vec<InterfaceKey>,
	factory: Factory,
}

impl ClassDescriptor {

	/// Starts a descriptor for the class `T` constructed by `factory`.
	///
	/// The factory receives the current [`Dependencies`] and may pull any
	/// instance it needs out of them. Declare what it needs with
	/// [`DescriptorBuilder::require`] so the loader only offers the class once
	/// those instances exist.
	pub fn builder<T>(
		factory: impl Fn( Dependencies<'_> ) -> Result<T, FactoryError> + Send + Sync + 'static,
	) -> DescriptorBuilder<T>
	where
		T: Send + Sync + 'static,
	{
		DescriptorBuilder {
			description: String::new(),
			kind: DescriptorKind::Extension,
			provisions: Vec::new(),
			requires: Vec::new(),
			factory: Box::new( factory ),
		}
	}

	/// Describes a plain class `T` that is loadable as the interface `I`.
	///
	/// Plain classes have no requirements and are always available. This is how
	/// types that know nothing about the loader are made loadable.
	///
	/// ```
	/// use class_loader::{ ClassDescriptor, DescriptorKind };
	///
	/// trait Car: Send + Sync { fn kind( &self ) -> &'static str ; }
	/// struct Honda ;
	/// impl Car for Honda { fn kind( &self ) -> &'static str { "Honda" } }
	///
	/// let descriptor = ClassDescriptor::plain::<Honda, dyn Car>(|| Honda, | car | car );
	/// assert_eq!( descriptor.kind(), DescriptorKind::Plain );
	/// assert!( descriptor.is_unconditional() );
	/// ```
	pub fn plain<T, I>(
		constructor: impl Fn() -> T + Send + Sync + 'static,
		upcast: impl Fn( Arc<T> ) -> Arc<I> + Send + Sync + 'static,
	) -> Self
	where
		T: Send + Sync + 'static,
		I: ?Sized + Send + Sync + 'static,
	{
		let mut builder = Self::builder( move | _ | Ok( constructor() )).provide::<I>( upcast );
		builder.kind = DescriptorKind::Plain ;
		builder.finish( NEVec::new( InterfaceKey::of::<I>() ))
	}

	/// Type name of the class this descriptor constructs.
	#[inline] pub fn class_name( &self ) -> &'static str { self.class_name }

	/// Free-text description, empty if none was given.
	#[inline] pub fn description( &self ) -> &str { &self.description }

	/// How the class was made loadable.
	#[inline] pub fn kind( &self ) -> DescriptorKind { self.kind }

	/// Interfaces a constructed instance is registered under. Never empty.
	pub fn provides( &self ) -> impl Iterator<Item = &InterfaceKey> + '_ {
		self.provides.iter().into_iter()
	}

	/// Interfaces that must have an instance before this class can be constructed.
	#[inline] pub fn requires( &self ) -> &[InterfaceKey] { &self.requires }

	/// Returns `true` if instances of this class are registered under `key`.
	pub fn provides_interface( &self, key: &InterfaceKey ) -> bool {
		self.provides().any(| provided | provided == key )
	}

	/// Returns `true` if the class has no requirements, making it available
	/// regardless of what the repository holds.
	#[inline] pub fn is_unconditional( &self ) -> bool { self.requires.is_empty() }

	pub(crate) fn construct( &self, dependencies: Dependencies<'_> ) -> Result<Instance, FactoryError> {
		( self.factory )( dependencies )
	}

}

impl std::fmt::Debug for ClassDescriptor {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ClassDescriptor" )
			.field( "class_name", &self.class_name )
			.field( "description", &self.description )
			.field( "kind", &self.kind )
			.field( "provides", &self.provides )
			.field( "requires", &self.requires )
			.finish_non_exhaustive()
	}
}

/// Builder for a [`ClassDescriptor`] of the class `T`.
///
/// Obtained from [`ClassDescriptor::builder`].
#[must_use = "call .build() to obtain a ClassDescriptor"]
pub struct DescriptorBuilder<T> {
	description: String,
	kind: DescriptorKind,
	provisions: Vec<( InterfaceKey, Cast<T> )>,
	requires: Vec<InterfaceKey>,
	factory: TypedFactory<T>,
}

impl<T: Send + Sync + 'static> DescriptorBuilder<T> {

	/// Sets the free-text description.
	pub fn describe( mut self, description: impl Into<String> ) -> Self {
		self.description = description.into();
		self
	}

	/// Declares that the class is loadable as the interface `I`.
	///
	/// `upcast` converts a constructed instance into the interface handle. For
	/// trait objects this is usually the identity closure `| object | object`,
	/// relying on unsized coercion.
	pub fn provide<I>( mut self, upcast: impl Fn( Arc<T> ) -> Arc<I> + Send + Sync + 'static ) -> Self
	where
		I: ?Sized + Send + Sync + 'static,
	{
		let cast: Cast<T> = Box::new( move | object: &Arc<T> | -> Erased { Arc::new( upcast( Arc::clone( object ))) });
		self.provisions.push(( InterfaceKey::of::<I>(), cast ));
		self
	}

	/// Declares that the class is loadable as its own concrete type.
	pub fn provide_self( self ) -> Self {
		self.provide::<T>(| object | object )
	}

	/// Declares that an instance of `I` must exist before the class can be
	/// constructed. Repeated requirements are collapsed.
	pub fn require<I: ?Sized + 'static>( mut self ) -> Self {
		self.requires.push( InterfaceKey::of::<I>() );
		self
	}

	/// Finishes the descriptor.
	///
	/// # Errors
	/// - [`DescriptorError::NothingProvided`] if no interface was provided
	/// - [`DescriptorError::ProvidedTwice`] if an interface was provided twice
	pub fn build( self ) -> Result<ClassDescriptor, DescriptorError> {
		let class_name = std::any::type_name::<T>();
		if let Some( key ) = self.provisions.iter().map(|( key, _ )| key ).duplicates().next() {
			return Err( DescriptorError::ProvidedTwice( class_name, *key ));
		}
		let provides = self.provisions.iter()
			.map(|( key, _ )| *key )
			.collect_vec()
			.pipe( NEVec::try_from_vec )
			.ok_or( DescriptorError::NothingProvided( class_name ))?;
		Ok( self.finish( provides ))
	}

	// `provides` must list the keys of `self.provisions` in order.
	fn finish( self, provides: NEVec<InterfaceKey> ) -> ClassDescriptor {
		let class_name = std::any::type_name::<T>();
		let Self { description, kind, provisions, requires, factory } = self ;

		let factory: Factory = Box::new( move | dependencies: Dependencies<'_> | {
			let object = Arc::new( factory( dependencies )? );
			Ok( Instance {
				class_name,
				handles: provisions.iter().map(|( key, cast )| ( *key, cast( &object ))).collect(),
			})
		});

		ClassDescriptor {
			class_name,
			description,
			kind,
			provides,
			requires: requires.into_iter().unique().collect(),
			factory,
		}
	}

}

/// Marker trait for classes that declare their own loadability.
///
/// Implementors describe themselves in [`declare`]( Self::declare ) and
/// construct themselves in [`generate`]( Self::generate ). Any type can be made
/// loadable this way, independent of any type hierarchy; declarations compose
/// by calling a shared helper, so a subclass can re-declare everything its
/// parent provides.
///
/// ```
/// use class_loader::{ Extension, DescriptorBuilder, Dependencies, FactoryError };
///
/// trait Structure: Send + Sync { fn name( &self ) -> String ; }
///
/// struct Shed ;
/// impl Structure for Shed { fn name( &self ) -> String { "a shed".into() } }
///
/// impl Extension for Shed {
/// 	fn declare( class: DescriptorBuilder<Self> ) -> DescriptorBuilder<Self> {
/// 		class.describe( "A garden shed" ).provide_self().provide::<dyn Structure>(| shed | shed )
/// 	}
/// 	fn generate( _: Dependencies<'_> ) -> Result<Self, FactoryError> { Ok( Shed ) }
/// }
///
/// let descriptor = Shed::descriptor().unwrap();
/// assert_eq!( descriptor.provides().count(), 2 );
/// ```
pub trait Extension: Sized + Send + Sync + 'static {

	/// Declares the description, provisions and requirements of this class.
	fn declare( class: DescriptorBuilder<Self> ) -> DescriptorBuilder<Self> ;

	/// Constructs an instance, pulling dependencies out of `dependencies`.
	///
	/// # Errors
	/// Implementations fail if a dependency they need is absent or if their own
	/// construction fails.
	fn generate( dependencies: Dependencies<'_> ) -> Result<Self, FactoryError> ;

	/// Builds the descriptor for this class.
	///
	/// # Errors
	/// Fails if [`declare`]( Self::declare ) produces an invalid descriptor,
	/// see [`DescriptorBuilder::build`].
	fn descriptor() -> Result<ClassDescriptor, DescriptorError> {
		Self::declare( ClassDescriptor::builder( Self::generate )).build()
	}

}

/// A freshly constructed instance, as returned by
/// [`Loader::instantiate`]( crate::Loader::instantiate ).
///
/// Holds one handle per provided interface, all pointing at the same object.
/// The same handles are registered in the loader's repository.
#[derive( Clone )]
pub struct Instance {
	class_name: &'static str,
	handles: Vec<( InterfaceKey, Erased )>,
}

impl Instance {

	/// Type name of the constructed class.
	#[inline] pub fn class_name( &self ) -> &'static str { self.class_name }

	/// Returns the handle for the interface `I`, if the class provides it.
	pub fn get<I: ?Sized + Send + Sync + 'static>( &self ) -> Option<Arc<I>> {
		let key = InterfaceKey::of::<I>();
		self.handles.iter()
			.find(|( provided, _ )| *provided == key )
			.and_then(|( _, handle )| handle.downcast_ref::<Arc<I>>() )
			.cloned()
	}

	/// Interfaces this instance is registered under.
	pub fn provides( &self ) -> impl Iterator<Item = &InterfaceKey> + '_ {
		self.handles.iter().map(|( key, _ )| key )
	}

	pub(crate) fn handles( &self ) -> impl Iterator<Item = &( InterfaceKey, Erased )> + '_ {
		self.handles.iter()
	}

}

impl std::fmt::Debug for Instance {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Instance" )
			.field( "class_name", &self.class_name )
			.field( "provides", &self.provides().collect_vec() )
			.finish_non_exhaustive()
	}
}
