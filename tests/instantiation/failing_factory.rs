use class_loader::{ InterfaceKey, LoaderError };
use crate::fixture_classes::{ TwoCarGarage, CondemnedHouse, Garage, House, Structure };

#[test]
fn instantiation_failure_registers_nothing() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage, CondemnedHouse ] };
	loader.instantiate( &loader.available_for::<dyn Garage>()[0] ).unwrap();

	let house = loader.available_for::<dyn House>();
	assert_eq!( house.len(), 1 );

	match loader.instantiate( &house[0] ) {
		Err( LoaderError::FactoryFailed { class, source }) => {
			assert_eq!( class, std::any::type_name::<CondemnedHouse>() );
			assert_eq!( source.to_string(), "failed inspection" );
		},
		other => panic!( "Expected FactoryFailed, got {:?}", other ),
	}

	let repository = loader.repository();
	assert_eq!( repository.count( &InterfaceKey::of::<dyn House>() ), 0 );
	assert_eq!( repository.count( &InterfaceKey::of::<dyn Structure>() ), 1 );

	// Still available, and still failing the same way.
	assert_eq!( loader.available_for::<dyn House>().len(), 1 );
	assert!( matches!( loader.instantiate( &house[0] ), Err( LoaderError::FactoryFailed { .. })));

}
