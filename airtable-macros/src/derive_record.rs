//! Implementation of the `#[derive(Record)]` macro.

use proc_macro2::TokenStream;
use syn::{parse2, DeriveInput, Result};

use crate::codegen::generate_record_impl;
use crate::parse::RecordInput;

/// Main implementation for the `#[derive(Record)]` macro.
pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    match derive_record_inner(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn derive_record_inner(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let record = RecordInput::from_derive(&input)?;
    Ok(generate_record_impl(&input, &record))
}
