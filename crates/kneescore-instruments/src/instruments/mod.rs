pub mod ikdc;
pub mod iks;
pub mod koos;
pub mod lysholm_tegner;
pub mod womac;
