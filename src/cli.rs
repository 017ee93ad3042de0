use clap::Parser;

use crate::i18n::Locale;

#[derive(Parser, Debug)]
#[command(name = "asterium-promo", version, about = "Asterium wallet giveaway in the terminal")]
pub struct Args {
    /// Interface language, overrides the config file
    #[arg(short, long, value_enum)]
    pub locale: Option<Locale>,

    /// Open the participate form on start
    #[arg(short, long)]
    pub participate: bool,

    /// Start on the winners leaderboard
    #[arg(short, long, conflicts_with = "participate")]
    pub winners: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["asterium-promo", "--locale", "uz", "-p"]);
        assert_eq!(args.locale, Some(Locale::Uz));
        assert!(args.participate);
        assert!(!args.winners);

        assert!(Args::try_parse_from(["asterium-promo", "-p", "-w"]).is_err());
    }
}
