use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};
use zone_core::{
    GenerateOptions, GroupMerge, NameOrder, Separator, Vendor, ZoneMode, DEFAULT_IFACE_RANGE,
};
use zone_designer::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "zone-designer")]
#[command(about = "Generate, roll back and reconcile Cisco and Brocade SAN zoning")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate zoning configuration from initiator and target lists.
    Generate(GenerateArgs),
    /// Compare generated zones against existing switch output.
    Diff(DiffArgs),
    /// Check an endpoint list without generating anything.
    Validate(ValidateArgs),
    /// Recover zones from switch output or command files.
    Import(ImportArgs),
    /// Convert a line-format endpoint list to YAML.
    Migrate(MigrateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum VendorArg {
    Cisco,
    Brocade,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    Single,
    Many,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OrderArg {
    /// `<target>__<initiator>`
    Ti,
    /// `<initiator>__<target>`
    It,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum SepArg {
    /// `_`
    One,
    /// `__`
    Two,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum GroupMergeArg {
    Block,
    Name,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum KindArg {
    Auto,
    Initiators,
    Targets,
}

/// Options shared by every command that builds zones.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Initiators file (.txt or .yaml).
    #[arg(short, long)]
    pub initiators: PathBuf,
    /// Targets file (.txt or .yaml).
    #[arg(short, long)]
    pub targets: PathBuf,
    #[arg(long, value_enum)]
    pub vendor: Option<VendorArg>,
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
    #[arg(long, value_enum)]
    pub sep: Option<SepArg>,
    /// VSAN number, required for Cisco.
    #[arg(long)]
    pub vsan: Option<u16>,
    /// VSAN name (default VSAN_<n>).
    #[arg(long, visible_alias = "vsn")]
    pub vsan_name: Option<String>,
    /// FC interface range assigned to the VSAN.
    #[arg(long, visible_alias = "if")]
    pub iface: Option<String>,
    /// Zoneset (Cisco) or CFG (Brocade) name.
    #[arg(long, visible_alias = "zs")]
    pub zoneset: Option<String>,
    /// Only use endpoints in this fabric.
    #[arg(long)]
    pub fabric: Option<String>,
    /// How same-named target groups combine in grouped mode.
    #[arg(long, value_enum)]
    pub group_merge: Option<GroupMergeArg>,
    /// Defaults file (default ./zone-designer.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GenerationArgs {
    /// Merge flags over file settings over built-in defaults.
    pub fn resolve(&self, settings: &Settings) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            vendor: self
                .vendor
                .map(Vendor::from)
                .or(settings.vendor)
                .unwrap_or(defaults.vendor),
            mode: self
                .mode
                .map(ZoneMode::from)
                .or(settings.mode)
                .unwrap_or(defaults.mode),
            order: self
                .order
                .map(NameOrder::from)
                .or(settings.order)
                .unwrap_or(defaults.order),
            separator: self
                .sep
                .map(Separator::from)
                .or(settings.separator)
                .unwrap_or(defaults.separator),
            vsan: self.vsan.or(settings.vsan).unwrap_or(defaults.vsan),
            vsan_name: self.vsan_name.clone().or_else(|| settings.vsan_name.clone()),
            iface_range: self
                .iface
                .clone()
                .or_else(|| settings.iface.clone())
                .unwrap_or_else(|| DEFAULT_IFACE_RANGE.to_string()),
            zoneset_name: self.zoneset.clone().or_else(|| settings.zoneset.clone()),
            fabric_filter: self.fabric.clone().or_else(|| settings.fabric.clone()),
            rollback: settings.rollback.unwrap_or(defaults.rollback),
            group_merge: self
                .group_merge
                .map(GroupMerge::from)
                .or(settings.group_merge)
                .unwrap_or(defaults.group_merge),
        }
    }
}

impl From<VendorArg> for Vendor {
    fn from(arg: VendorArg) -> Self {
        match arg {
            VendorArg::Cisco => Vendor::Cisco,
            VendorArg::Brocade => Vendor::Brocade,
        }
    }
}

impl From<ModeArg> for ZoneMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => ZoneMode::Single,
            ModeArg::Many => ZoneMode::Many,
        }
    }
}

impl From<OrderArg> for NameOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Ti => NameOrder::TargetInitiator,
            OrderArg::It => NameOrder::InitiatorTarget,
        }
    }
}

impl From<SepArg> for Separator {
    fn from(arg: SepArg) -> Self {
        match arg {
            SepArg::One => Separator::One,
            SepArg::Two => Separator::Two,
        }
    }
}

impl From<GroupMergeArg> for GroupMerge {
    fn from(arg: GroupMergeArg) -> Self {
        match arg {
            GroupMergeArg::Block => GroupMerge::Block,
            GroupMergeArg::Name => GroupMerge::Name,
        }
    }
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
    /// YAML list of explicit `{initiator, targets}` selections.
    #[arg(long)]
    pub pairs: Option<PathBuf>,
    /// Write the configuration here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the zone CSV here.
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Also write rollback.cfg and rollback.csv.
    #[arg(long)]
    pub rollback: bool,
    /// Directory for rollback files.
    #[arg(long)]
    pub rollback_dir: Option<PathBuf>,
    /// Print the summary and a zone preview only.
    #[arg(long)]
    pub dry: bool,
    /// Disable colored output.
    #[arg(long)]
    pub plain: bool,
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
    /// Existing zone configuration (switch output or command file).
    #[arg(short, long)]
    pub existing: PathBuf,
    /// YAML list of explicit `{initiator, targets}` selections.
    #[arg(long)]
    pub pairs: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print counts only.
    #[arg(long)]
    pub summary: bool,
    /// Also write the JSON report here.
    #[arg(long)]
    pub report: Option<PathBuf>,
    #[arg(long)]
    pub plain: bool,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = KindArg::Auto)]
    pub kind: KindArg,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Fail on any finding.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Line-format input file.
    #[arg(short, long)]
    pub input: PathBuf,
    /// YAML output file.
    #[arg(short, long)]
    pub output: PathBuf,
    #[arg(long, value_enum, default_value_t = KindArg::Auto)]
    pub kind: KindArg,
}
