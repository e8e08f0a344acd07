use clap::ValueEnum;
use devsweep_core::IdentifierField;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IdentifierArg {
    Guid,
    Id,
}

impl From<IdentifierArg> for IdentifierField {
    fn from(value: IdentifierArg) -> Self {
        match value {
            IdentifierArg::Guid => IdentifierField::Guid,
            IdentifierArg::Id => IdentifierField::Id,
        }
    }
}
