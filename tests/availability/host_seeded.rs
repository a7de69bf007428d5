use std::sync::Arc ;
use class_loader::{ Loader, Repository, SourceUnit, SingleView };
use crate::fixture_classes::{ BasicHouse, Garage, House, Structure };

struct HostGarage ;
impl Structure for HostGarage { fn name( &self ) -> String { "the host's garage".into() } }
impl Garage for HostGarage {}

#[test]
fn availability_satisfied_by_host_instance() {

	let repository = Repository::new();
	repository.register::<dyn Garage>( Arc::new( HostGarage ));

	let mut unit = SourceUnit::new();
	unit.make_available::<BasicHouse>().unwrap();

	let loader = Loader::with_repository( repository );
	loader.add_source( "Local Classes", unit ).unwrap();

	let mut house = SingleView::<dyn House>::new( &loader );
	assert_eq!( house.count_available(), 1 );

	house.load_first().unwrap();
	assert_eq!( house.instance().unwrap().garage_name(), "the host's garage" );

}
