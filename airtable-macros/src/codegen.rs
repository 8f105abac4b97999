//! Code generation for `#[derive(Record)]`.
//!
//! Generated code refers to the runtime crate as `::airtable`, and to its
//! helper re-exports through `::airtable::__private`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::RecordInput;

/// Generates the `Record` impl.
///
/// For
///
/// ```ignore
/// #[derive(Default, Record)]
/// struct Pet {
///     #[airtable(id)]
///     id: String,
///     #[airtable(rename = "Name")]
///     name: Text,
/// }
/// ```
///
/// this produces a descriptor mapping `name` to `"Name"`, a `decode_field`
/// that routes `"name"` through `<Text as FieldCodec>::decode_column`, the
/// matching `encode_field`, and metadata accessors for `id`.
pub fn generate_record_impl(input: &DeriveInput, record: &RecordInput) -> TokenStream {
    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptor = generate_descriptor(&name_str, record);
    let decode = generate_decode_field(record);
    let encode = generate_encode_field(record);
    let metadata = generate_metadata(record);

    quote! {
        #[automatically_derived]
        impl #impl_generics ::airtable::Record for #name #ty_generics #where_clause {
            #descriptor
            #decode
            #encode
            #metadata
        }
    }
}

fn generate_descriptor(name: &str, record: &RecordInput) -> TokenStream {
    let columns = record.columns().map(|(field, column)| {
        let ty = &field.ty;
        let field_name = field.name();
        quote! { .column::<#ty>(#field_name, #column) }
    });
    let id = record.id_field().map(|field| {
        let field_name = field.name();
        quote! { .id_field(#field_name) }
    });
    let created_time = record.created_time_field().map(|field| {
        let field_name = field.name();
        quote! { .created_time_field(#field_name) }
    });

    quote! {
        fn descriptor() -> ::airtable::RecordDescriptor {
            ::airtable::RecordDescriptor::builder(#name)
                #(#columns)*
                #id
                #created_time
                .build()
        }
    }
}

fn generate_decode_field(record: &RecordInput) -> TokenStream {
    let arms = record.columns().map(|(field, _)| {
        let ident = &field.ident;
        let ty = &field.ty;
        let field_name = field.name();
        quote! {
            #field_name => {
                self.#ident = <#ty as ::airtable::FieldCodec>::decode_column(value)?;
            }
        }
    });

    quote! {
        #[allow(unused_variables)]
        fn decode_field(
            &mut self,
            field: &str,
            value: ::core::option::Option<&::airtable::__private::Value>,
        ) -> ::core::result::Result<(), ::airtable::CodecError> {
            match field {
                #(#arms)*
                _ => {}
            }
            ::core::result::Result::Ok(())
        }
    }
}

fn generate_encode_field(record: &RecordInput) -> TokenStream {
    let arms = record.columns().map(|(field, _)| {
        let ident = &field.ident;
        let ty = &field.ty;
        let field_name = field.name();
        quote! {
            #field_name => <#ty as ::airtable::FieldCodec>::encode(&self.#ident),
        }
    });

    quote! {
        #[allow(unused_variables)]
        fn encode_field(
            &self,
            field: &str,
        ) -> ::core::option::Option<::airtable::__private::Value> {
            match field {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    }
}

/// Metadata accessors, only emitted when a field holds id or creation time.
fn generate_metadata(record: &RecordInput) -> TokenStream {
    let id = record.id_field().map(|field| &field.ident);
    let created_time = record.created_time_field().map(|field| &field.ident);
    if id.is_none() && created_time.is_none() {
        return TokenStream::new();
    }

    let string = quote! { ::std::string::String };
    let instant = quote! {
        ::airtable::__private::DateTime<::airtable::__private::Utc>
    };

    let fill_id = id.map(|ident| {
        quote! {
            ::airtable::__private::MetaSlot::<#string>::fill(&mut self.#ident, meta.id);
        }
    });
    let fill_created = created_time.map(|ident| {
        quote! {
            ::airtable::__private::MetaSlot::<#instant>::fill(&mut self.#ident, meta.created_time);
        }
    });

    let read_id = match id {
        Some(ident) => quote! { ::airtable::__private::MetaSlot::<#string>::read(&self.#ident) },
        None => quote! { ::core::option::Option::None },
    };
    let read_created = match created_time {
        Some(ident) => quote! { ::airtable::__private::MetaSlot::<#instant>::read(&self.#ident) },
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        fn set_metadata(&mut self, meta: ::airtable::RecordMeta) {
            #fill_id
            #fill_created
        }

        fn metadata(&self) -> ::airtable::RecordMeta {
            ::airtable::RecordMeta {
                id: #read_id,
                created_time: #read_created,
            }
        }
    }
}
