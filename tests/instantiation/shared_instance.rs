use class_loader::InterfaceKey ;
use crate::fixture_classes::{ same_object, TwoCarGarage, Garage, Structure };

#[test]
fn instantiation_registers_one_object_per_interface() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage ] };
	let instance = loader.instantiate( &loader.available_for::<dyn Garage>()[0] ).unwrap();

	let garage = instance.get::<dyn Garage>().unwrap();
	let structure = instance.get::<dyn Structure>().unwrap();
	let concrete = instance.get::<TwoCarGarage>().unwrap();
	assert!( same_object( &garage, &structure ));
	assert!( same_object( &garage, &concrete ));

	let repository = loader.repository();
	assert!( same_object( &repository.first::<dyn Garage>().unwrap(), &concrete ));
	assert!( same_object( &repository.first::<dyn Structure>().unwrap(), &concrete ));
	assert_eq!( repository.count( &InterfaceKey::of::<TwoCarGarage>() ), 1 );

	assert_eq!( instance.class_name(), std::any::type_name::<TwoCarGarage>() );
	assert_eq!( instance.provides().count(), 3 );

}

#[test]
fn instantiation_twice_yields_distinct_objects() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage ] };
	let descriptor = loader.available_for::<dyn Garage>().remove( 0 );

	let first = loader.instantiate( &descriptor ).unwrap().get::<dyn Garage>().unwrap();
	let second = loader.instantiate( &descriptor ).unwrap().get::<dyn Garage>().unwrap();

	assert!( !same_object( &first, &second ));
	assert_eq!( loader.repository().all::<dyn Structure>().len(), 2 );

}
