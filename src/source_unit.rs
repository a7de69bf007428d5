//! Grouping of class descriptors contributed by one origin.

use std::sync::Arc ;
use thiserror::Error ;

use crate::interface::InterfaceKey ;
use crate::descriptor::{ ClassDescriptor, DescriptorError, Extension };



/// Error that can occur while adding descriptors to a [`SourceUnit`].
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum SourceError {
	/// The descriptor itself is invalid.
	#[error( "Invalid descriptor: {0}" )]
	InvalidDescriptor( #[from] DescriptorError ),
	/// An exclusive unit already holds a provider for this interface.
	#[error( "Interface {0} already has a provider in this unit" )]
	DuplicateProvision( InterfaceKey ),
}

/// An ordered collection of [`ClassDescriptor`]s contributed by one origin.
///
/// The origin may be the host itself registering local classes, or a module
/// found by a [`SourceDiscovery`]( crate::SourceDiscovery ) implementation.
/// Descriptor order is preserved and decides iteration order when the loader
/// lists available classes.
///
/// By default any number of descriptors may provide the same interface. Call
/// [`exclusive`]( Self::exclusive ) to reject a descriptor that provides an
/// interface some earlier descriptor in the unit already provides.
#[derive( Debug, Default )]
pub struct SourceUnit {
	descriptors: Vec<Arc<ClassDescriptor>>,
	exclusive: bool,
}

impl SourceUnit {

	/// Creates an empty unit allowing several providers per interface.
	pub fn new() -> Self { Self::default() }

	/// Rejects descriptors providing an interface that is already provided
	/// within this unit.
	pub fn exclusive( mut self ) -> Self {
		self.exclusive = true ;
		self
	}

	/// Appends a descriptor.
	///
	/// # Errors
	/// Returns [`SourceError::DuplicateProvision`] if the unit is exclusive and
	/// one of the descriptor's interfaces already has a provider here. The unit
	/// is left unchanged.
	pub fn add( &mut self, descriptor: ClassDescriptor ) -> Result<&mut Self, SourceError> {
		let taken = self.exclusive
			.then(|| descriptor.provides().find(| key | self.provides_interface( key )).copied() )
			.flatten();
		if let Some( key ) = taken { return Err( SourceError::DuplicateProvision( key )) }
		self.descriptors.push( Arc::new( descriptor ));
		Ok( self )
	}

	/// Makes the [`Extension`] class `T` loadable.
	///
	/// # Errors
	/// Fails if `T` declares an invalid descriptor, or as [`add`]( Self::add ).
	pub fn make_available<T: Extension>( &mut self ) -> Result<&mut Self, SourceError> {
		self.add( T::descriptor()? )
	}

	/// Makes the plain class `T` loadable as the interface `I`, see
	/// [`ClassDescriptor::plain`].
	///
	/// # Errors
	/// Fails as [`add`]( Self::add ).
	pub fn make_plain_available<T, I>(
		&mut self,
		constructor: impl Fn() -> T + Send + Sync + 'static,
		upcast: impl Fn( Arc<T> ) -> Arc<I> + Send + Sync + 'static,
	) -> Result<&mut Self, SourceError>
	where
		T: Send + Sync + 'static,
		I: ?Sized + Send + Sync + 'static,
	{
		self.add( ClassDescriptor::plain( constructor, upcast ))
	}

	/// Descriptors providing `key`, in registration order.
	pub fn descriptors_for( &self, key: &InterfaceKey ) -> Vec<Arc<ClassDescriptor>> {
		self.descriptors.iter()
			.filter(| descriptor | descriptor.provides_interface( key ))
			.cloned()
			.collect()
	}

	/// Returns `true` if any descriptor in the unit provides `key`.
	pub fn provides_interface( &self, key: &InterfaceKey ) -> bool {
		self.descriptors.iter().any(| descriptor | descriptor.provides_interface( key ))
	}

	/// All descriptors, in registration order.
	#[inline] pub fn descriptors( &self ) -> &[Arc<ClassDescriptor>] { &self.descriptors }

	/// Number of descriptors in the unit.
	#[inline] pub fn len( &self ) -> usize { self.descriptors.len() }

	/// Returns `true` if the unit holds no descriptors.
	#[inline] pub fn is_empty( &self ) -> bool { self.descriptors.is_empty() }

}
