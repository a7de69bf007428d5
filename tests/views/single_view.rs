use class_loader::{ SingleView, ViewError };
use crate::fixture_classes::{ same_object, TwoCarGarage, FourCarGarage, Garage };

#[test]
fn single_view_refuses_second_load() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage, FourCarGarage ] };
	let mut garage = SingleView::<dyn Garage>::new( &loader );

	let loaded = garage.load_first().unwrap().unwrap();
	assert!( garage.is_full() );

	let other = garage.available().remove( 1 );
	match garage.load( &other ) {
		Err( ViewError::AlreadyLoaded( key )) => assert_eq!( key, garage.interface() ),
		Err( error ) => panic!( "Expected AlreadyLoaded, got {}", error ),
		Ok( _ ) => panic!( "Second load into a single view succeeded" ),
	}

	assert_eq!( garage.len(), 1 );
	assert!( same_object( garage.instance().unwrap(), &loaded ));
	assert_eq!( garage.instance().unwrap().name(), "a two car garage" );

	// Nothing was constructed by the refused load.
	assert_eq!( loader.repository().all::<dyn Garage>().len(), 1 );
	// Availability is a loader property, not a view one.
	assert_eq!( garage.count_available(), 2 );

}

#[test]
fn single_view_starts_empty() {

	let loader = loader_with! { "Local Classes" => [ TwoCarGarage ] };
	let garage = SingleView::<dyn Garage>::new( &loader );

	assert!( garage.is_empty() );
	assert!( garage.instance().is_none() );
	assert!( !garage.is_full() );

}
