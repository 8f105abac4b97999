//! Parsing of `#[airtable(...)]` field attributes.

use std::collections::HashMap;

use proc_macro2::Span;
use syn::{
    ext::IdentExt, spanned::Spanned, Attribute, Data, DeriveInput, Error, Field, Fields, Ident,
    LitStr, Result, Type,
};

/// What a struct field is used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRole {
    /// Mapped to the named column.
    Column(String),
    /// Holds the record id.
    Id,
    /// Holds the record creation time.
    CreatedTime,
    /// Not touched by the mapper.
    Skip,
}

/// One parsed struct field.
#[derive(Debug)]
pub struct RecordField {
    pub ident: Ident,
    pub ty: Type,
    pub role: FieldRole,
}

impl RecordField {
    /// The field name as the descriptor reports it (raw prefix stripped).
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Record fields must be named"))?;

        let mut rename: Option<LitStr> = None;
        let mut markers: Vec<(FieldRole, Span)> = Vec::new();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("airtable")) {
            parse_field_attr(attr, &mut rename, &mut markers)?;
        }

        if markers.len() > 1 {
            return Err(Error::new(
                markers[1].1,
                "only one of `id`, `created_time` or `skip` may be used on a field",
            ));
        }

        let role = match (markers.pop(), rename) {
            (Some((_, span)), Some(_)) => {
                return Err(Error::new(
                    span,
                    "`rename` only applies to column fields",
                ));
            }
            (Some((role, _)), None) => role,
            (None, Some(column)) => {
                if column.value().is_empty() {
                    return Err(Error::new(column.span(), "column name cannot be empty"));
                }
                FieldRole::Column(column.value())
            }
            (None, None) => FieldRole::Column(ident.unraw().to_string()),
        };

        Ok(RecordField {
            ident,
            ty: field.ty.clone(),
            role,
        })
    }
}

fn parse_field_attr(
    attr: &Attribute,
    rename: &mut Option<LitStr>,
    markers: &mut Vec<(FieldRole, Span)>,
) -> Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            let value: LitStr = meta.value()?.parse()?;
            if rename.is_some() {
                return Err(meta.error("duplicate `rename`"));
            }
            *rename = Some(value);
        } else if meta.path.is_ident("id") {
            markers.push((FieldRole::Id, meta.path.span()));
        } else if meta.path.is_ident("created_time") {
            markers.push((FieldRole::CreatedTime, meta.path.span()));
        } else if meta.path.is_ident("skip") {
            markers.push((FieldRole::Skip, meta.path.span()));
        } else {
            return Err(meta.error(format!(
                "unknown airtable attribute: `{}`. Expected one of: rename, id, created_time, skip",
                meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
            )));
        }
        Ok(())
    })
}

/// A parsed `#[derive(Record)]` input.
#[derive(Debug)]
pub struct RecordInput {
    pub fields: Vec<RecordField>,
}

impl RecordInput {
    pub fn from_derive(input: &DeriveInput) -> Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "Record can only be derived on structs with named fields",
                    ));
                }
            },
            Data::Enum(_) => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Record cannot be derived on enums",
                ));
            }
            Data::Union(_) => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Record cannot be derived on unions",
                ));
            }
        };

        let fields = named
            .named
            .iter()
            .map(RecordField::from_field)
            .collect::<Result<Vec<_>>>()?;

        let input = RecordInput { fields };
        input.validate()?;
        Ok(input)
    }

    fn validate(&self) -> Result<()> {
        let mut columns: HashMap<&str, &Ident> = HashMap::new();
        let mut id: Option<&Ident> = None;
        let mut created_time: Option<&Ident> = None;

        for field in &self.fields {
            match &field.role {
                FieldRole::Column(column) => {
                    if let Some(first) = columns.insert(column.as_str(), &field.ident) {
                        return Err(Error::new(
                            field.ident.span(),
                            format!("column `{column}` is already mapped by `{first}`"),
                        ));
                    }
                }
                FieldRole::Id => {
                    if let Some(first) = id.replace(&field.ident) {
                        return Err(Error::new(
                            field.ident.span(),
                            format!("record id is already held by `{first}`"),
                        ));
                    }
                }
                FieldRole::CreatedTime => {
                    if let Some(first) = created_time.replace(&field.ident) {
                        return Err(Error::new(
                            field.ident.span(),
                            format!("created time is already held by `{first}`"),
                        ));
                    }
                }
                FieldRole::Skip => {}
            }
        }
        Ok(())
    }

    /// Fields mapped to columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&RecordField, &str)> {
        self.fields.iter().filter_map(|f| match &f.role {
            FieldRole::Column(column) => Some((f, column.as_str())),
            _ => None,
        })
    }

    pub fn id_field(&self) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.role == FieldRole::Id)
    }

    pub fn created_time_field(&self) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.role == FieldRole::CreatedTime)
    }
}
