//! Generation stages, leaves first: extraction → resolution → sequencing →
//! planning → emission.

pub mod emission;
pub mod extraction;
pub mod planning;
pub mod resolution;
pub mod sequencing;
