use std::sync::Arc ;
use std::sync::atomic::{ AtomicUsize, Ordering };
use class_loader::{ ClassDescriptor, InterfaceKey, Loader, LoaderError, SourceUnit };
use crate::fixture_classes::{ BasicHouse, Garage, House };

#[test]
fn instantiation_refused_without_dependency() {

	let loader = loader_with! { "Local Classes" => [ BasicHouse ] };
	let house = loader.descriptors( &InterfaceKey::of::<dyn House>() ).remove( 0 );

	match loader.instantiate( &house ) {
		Err( LoaderError::UnsatisfiedDependency { class, missing }) => {
			assert_eq!( class, std::any::type_name::<BasicHouse>() );
			assert_eq!( missing, vec![ InterfaceKey::of::<dyn Garage>() ]);
		},
		other => panic!( "Expected UnsatisfiedDependency, got {:?}", other ),
	}
	assert_eq!( loader.repository().count( &InterfaceKey::of::<dyn House>() ), 0 );

}

#[test]
fn instantiation_refused_before_factory_runs() {

	struct Counted ;

	let calls = Arc::new( AtomicUsize::new( 0 ));
	let counter = Arc::clone( &calls );
	let descriptor = ClassDescriptor::builder(move | _ | {
		counter.fetch_add( 1, Ordering::SeqCst );
		Ok( Counted )
	})
		.provide_self()
		.require::<dyn Garage>()
		.build()
		.unwrap();

	let mut unit = SourceUnit::new();
	unit.add( descriptor ).unwrap();
	let loader = Loader::new();
	loader.add_source( "Counted", unit ).unwrap();

	let descriptor = loader.descriptors( &InterfaceKey::of::<Counted>() ).remove( 0 );
	assert!( loader.instantiate( &descriptor ).is_err() );
	assert_eq!( calls.load( Ordering::SeqCst ), 0 );
	assert!( loader.available_for::<Counted>().is_empty() );

}
