//! Pipeline conversions module
//!
//! This module contains orchestration logic for the RG10 to TGA conversion.

mod rg10_to_tga;


pub use rg10_to_tga::Rg10ToTgaPipeline;
