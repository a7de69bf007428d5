//! Cardinality policies for interface views.
//!
//! A view's cardinality decides how many instances it may load, not whether a
//! class is available: availability only depends on the repository. A view
//! that is full keeps listing available classes but refuses further loads.

/// How many instances an [`InterfaceView`]( crate::InterfaceView ) may hold.
pub trait Cardinality {

    /// Most instances a view may hold, `None` if unbounded.
    const LIMIT: Option<usize> ;

    /// Returns `true` if a view already holding `loaded` instances may load another.
    fn admits( loaded: usize ) -> bool {
        Self::LIMIT.is_none_or(| limit | loaded < limit )
    }
}

/// Zero or one instance. Loading into a view that holds one fails.
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq )]
pub struct AtMostOne ;

/// Zero or more instances.
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq )]
pub struct Any ;

impl Cardinality for AtMostOne {
    const LIMIT: Option<usize> = Some( 1 );
}

impl Cardinality for Any {
    const LIMIT: Option<usize> = None ;
}
