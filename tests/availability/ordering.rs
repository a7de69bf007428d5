use class_loader::{ InterfaceKey, SourceUnit };
use crate::fixture_classes::{ self, TwoCarGarage, FourCarGarage, BasicHouse, Garage, Structure, Car };

#[test]
fn availability_ordered_by_source_then_descriptor() {

	let loader = loader_with! {
		"Small" => [ TwoCarGarage ],
		"Large" => [ FourCarGarage, BasicHouse ],
	};

	let structures = loader.available_for::<dyn Structure>()
		.iter()
		.map(| descriptor | descriptor.class_name() )
		.collect::<Vec<_>>();
	assert_eq!( structures, vec![
		std::any::type_name::<TwoCarGarage>(),
		std::any::type_name::<FourCarGarage>(),
	]);

	// Unavailable providers are still listed as descriptors.
	assert_eq!( loader.descriptors( &InterfaceKey::of::<dyn Structure>() ).len(), 3 );
	assert_eq!( loader.source_names(), vec![ "Small".to_string(), "Large".to_string() ]);

}

#[test]
fn availability_stable_between_registrations() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage, FourCarGarage ] };
	loader.add_source( "Cars", fixture_classes::cars() ).unwrap();

	let names = || loader.available_for::<dyn Car>().iter().map(| d | d.class_name() ).collect::<Vec<_>>();
	assert_eq!( names(), names() );

	let first = loader.available_for::<dyn Garage>();
	let second = loader.available_for::<dyn Garage>();
	assert!( first.iter().zip( &second ).all(|( a, b )| std::sync::Arc::ptr_eq( a, b )));

}

#[test]
fn availability_lists_interfaces_in_first_seen_order() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage, BasicHouse ] };
	loader.add_source( "Empty", SourceUnit::new() ).unwrap();

	let interfaces = loader.interfaces();
	assert_eq!( interfaces, vec![
		InterfaceKey::of::<TwoCarGarage>(),
		InterfaceKey::of::<dyn Garage>(),
		InterfaceKey::of::<dyn Structure>(),
		InterfaceKey::of::<dyn fixture_classes::House>(),
	]);

}
