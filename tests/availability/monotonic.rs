use class_loader::{ Loader, InterfaceKey };
use crate::fixture_classes::{ self, TwoCarGarage, FourCarGarage, BasicHouse, Estate, Garage, House, Structure };

fn available_names( loader: &Loader ) -> Vec<&'static str> {
	loader.interfaces().iter()
		.flat_map(| key | loader.available( key ))
		.map(| descriptor | descriptor.class_name() )
		.collect()
}

#[test]
fn availability_never_shrinks() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage, FourCarGarage, BasicHouse, Estate ] };
	loader.add_source( "Cars", fixture_classes::cars() ).unwrap();

	let mut previous = available_names( &loader );
	let steps = [
		loader.available_for::<dyn Garage>()[0].clone(),
		loader.available_for::<dyn Garage>()[1].clone(),
	];
	for descriptor in steps {
		loader.instantiate( &descriptor ).unwrap();
		let current = available_names( &loader );
		assert!( previous.iter().all(| name | current.contains( name )), "{:?} lost entries of {:?}", current, previous );
		previous = current ;
	}

	assert!( loader.available_for::<Estate>().is_empty() );

	loader.instantiate( &loader.available_for::<dyn House>()[0] ).unwrap();
	assert!( loader.available_for::<Estate>().is_empty(), "Estate also needs a car" );

	loader.instantiate( &loader.available( &InterfaceKey::of::<dyn fixture_classes::Car>() )[0] ).unwrap();
	let estates = loader.available_for::<Estate>();
	assert_eq!( estates.len(), 1 );

	let estate = loader.instantiate( &estates[0] ).unwrap().get::<Estate>().unwrap();
	assert_eq!( estate.house.garage_name(), "a two car garage" );
	assert_eq!( estate.cars.len(), 1 );

	// Instantiating an available class does not take it off the list.
	assert_eq!( loader.available_for::<Estate>().len(), 1 );
	assert_eq!( loader.repository().all::<dyn Structure>().len(), 4 );

}
