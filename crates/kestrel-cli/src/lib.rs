use clap::ValueEnum;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DeviceStrategy {
    Mobile,
    Desktop,
}

impl DeviceStrategy {
    pub fn to_strategy(self) -> kestrel_client::Strategy {
        match self {
            DeviceStrategy::Mobile => kestrel_client::Strategy::Mobile,
            DeviceStrategy::Desktop => kestrel_client::Strategy::Desktop,
        }
    }
}
