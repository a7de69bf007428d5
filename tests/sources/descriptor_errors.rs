use class_loader::{ ClassDescriptor, DescriptorError, DescriptorKind, InterfaceKey, SourceUnit, SourceError };
use crate::fixture_classes::{ Garage, Structure, TwoCarGarage };

struct Shed ;

#[test]
fn descriptor_without_provision_rejected() {

	let result = ClassDescriptor::builder(| _ | Ok( Shed )).describe( "A shed" ).build();
	assert_eq!( result.unwrap_err(), DescriptorError::NothingProvided( std::any::type_name::<Shed>() ));

}

#[test]
fn descriptor_providing_twice_rejected() {

	let result = ClassDescriptor::builder(| _ | Ok( Shed ))
		.provide_self()
		.provide_self()
		.build();
	assert_eq!(
		result.unwrap_err(),
		DescriptorError::ProvidedTwice( std::any::type_name::<Shed>(), InterfaceKey::of::<Shed>() ),
	);

}

#[test]
fn descriptor_collapses_repeated_requirements() {

	let descriptor = ClassDescriptor::builder(| _ | Ok( Shed ))
		.provide_self()
		.require::<dyn Garage>()
		.require::<dyn Structure>()
		.require::<dyn Garage>()
		.build()
		.unwrap();

	assert_eq!( descriptor.requires(), &[ InterfaceKey::of::<dyn Garage>(), InterfaceKey::of::<dyn Structure>() ]);
	assert_eq!( descriptor.kind(), DescriptorKind::Extension );
	assert!( !descriptor.is_unconditional() );
	assert_eq!( descriptor.description(), "" );

}

#[test]
fn invalid_extension_rejected_by_unit() {

	struct Nothing ;
	impl class_loader::Extension for Nothing {
		fn declare( class: class_loader::DescriptorBuilder<Self> ) -> class_loader::DescriptorBuilder<Self> { class }
		fn generate( _: class_loader::Dependencies<'_> ) -> Result<Self, class_loader::FactoryError> { Ok( Self ) }
	}

	let mut unit = SourceUnit::new();
	assert!( matches!(
		unit.make_available::<Nothing>(),
		Err( SourceError::InvalidDescriptor( DescriptorError::NothingProvided( _ )))
	));
	assert!( unit.is_empty() );

	unit.make_available::<TwoCarGarage>().unwrap();
	assert_eq!( unit.descriptors()[0].description(), "A 2 car garage" );

}
