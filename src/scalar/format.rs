use crate::context::Context;
use crate::jsonschema::{Schema, StringFormat};
use crate::rules::WellKnownFormat;

/// What a well-known string rule becomes in the document schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatConstraint {
    /// A single `format` annotation on the field schema.
    Format(StringFormat),
    /// Any one of several formats; needs its own `anyOf` fragment.
    AnyOf(Vec<StringFormat>),
}

impl FormatConstraint {
    pub fn resolve(well_known: WellKnownFormat) -> Self {
        match well_known {
            WellKnownFormat::Address => Self::AnyOf(vec![
                StringFormat::Hostname,
                StringFormat::Ipv4,
                StringFormat::Ipv6,
            ]),
            WellKnownFormat::Email => Self::Format(StringFormat::Email),
            WellKnownFormat::Hostname => Self::Format(StringFormat::Hostname),
            WellKnownFormat::Ip => Self::AnyOf(vec![StringFormat::Ipv4, StringFormat::Ipv6]),
            WellKnownFormat::Ipv4 => Self::Format(StringFormat::Ipv4),
            WellKnownFormat::Ipv6 => Self::Format(StringFormat::Ipv6),
            WellKnownFormat::Uri => Self::Format(StringFormat::Uri),
            WellKnownFormat::UriRef => Self::Format(StringFormat::UriReference),
        }
    }
}

pub fn schema_for_string_formats(ctx: &Context, formats: &[StringFormat]) -> Schema {
    ctx.trace("schema_for_string_formats");
    Schema::any_of(
        formats
            .iter()
            .map(|format| Schema::string().with_format(*format))
            .collect(),
    )
}
