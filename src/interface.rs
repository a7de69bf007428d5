//! Interface identity.
//!
//! An interface is a capability tag that any number of concrete classes may
//! provide and any number of classes may require. It is not tied to a specific
//! class - it exists as an abstract contract that classes reference through
//! their provisions and requirements.

use std::any::TypeId ;
use std::hash::{ Hash, Hasher };



/// Unique identifier for an interface.
///
/// Keys are derived from a Rust type, usually a trait object such as
/// `dyn Garage`, but any `'static` type can serve as a capability tag. Two
/// descriptors provide the same interface iff their keys are equal.
///
/// Only the type identity takes part in equality and hashing; the type name is
/// kept for diagnostics.
///
/// ```
/// use class_loader::InterfaceKey ;
///
/// trait Car {}
/// assert_eq!( InterfaceKey::of::<dyn Car>(), InterfaceKey::of::<dyn Car>() );
/// assert_ne!( InterfaceKey::of::<dyn Car>(), InterfaceKey::of::<String>() );
/// ```
#[derive( Copy, Clone, Debug )]
pub struct InterfaceKey {
	id: TypeId,
	name: &'static str,
}

impl InterfaceKey {
	/// Returns the key for the interface `I`.
	pub fn of<I: ?Sized + 'static>() -> Self {
		Self { id: TypeId::of::<I>(), name: std::any::type_name::<I>() }
	}

	/// Fully qualified name of the interface type.
	#[inline] pub fn name( &self ) -> &'static str { self.name }
}

impl PartialEq for InterfaceKey {
	fn eq( &self, other: &Self ) -> bool { self.id == other.id }
}

impl Eq for InterfaceKey {}

impl Hash for InterfaceKey {
	fn hash<H: Hasher>( &self, state: &mut H ) { self.id.hash( state ) }
}

impl std::fmt::Display for InterfaceKey {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( self.name )}
}
