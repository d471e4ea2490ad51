use clap::Subcommand;
use plasmid_core::SortKey;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Check records in a JSON file without contacting the backend.
    Validate { path: PathBuf },
    /// List every bag and its records.
    Bags {
        #[arg(long, default_value_t = SortKey::Id)]
        sort: SortKey,
    },
    /// Search records by bag, id, lot, date or free text.
    Search {
        query: String,
        /// Ask the backend instead of filtering locally.
        #[arg(long, default_value_t = false)]
        remote: bool,
    },
    /// Save new records from a JSON file.
    Add { path: PathBuf },
    /// Take a sample out of storage.
    Checkout {
        id: String,
        /// Sample number as listed, starting at 1.
        #[arg(long)]
        sample: usize,
        /// Defaults to the configured user name.
        #[arg(long)]
        user: Option<String>,
    },
    /// Return a checked-out sample.
    Checkin {
        id: String,
        #[arg(long)]
        sample: usize,
        /// Remaining volume in mL; omit if the tube came back empty.
        #[arg(long)]
        volume: Option<String>,
    },
    /// List records with samples currently checked out.
    CheckedOut,
    /// Report backend and database reachability.
    Health {
        /// Keep polling at the configured interval.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
}
