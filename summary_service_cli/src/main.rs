use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use summary_service_cli::config::Config;
use summary_service_cli::pipeline::Pipeline;
use summary_service_cli::shell::{self, Session, ShellEvent, ShellState};
use summary_service_cli::{logging, utils, ExportFormat, Language};

#[derive(Parser, Debug)]
#[command(author, version, about = "Bir web sayfasını özetler ve PDF/TXT/DOCX olarak kaydeder", long_about = None)]
struct Args {
    /// URL of the page to summarize
    #[arg(short, long)]
    url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Pdf)]
    format: FormatArg,

    /// Translate title and summary into this language (tr = no translation)
    #[arg(short, long, value_enum, default_value_t = LangArg::Tr)]
    lang: LangArg,

    /// Directory the export is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Pdf,
    Txt,
    Docx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Docx => ExportFormat::Docx,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LangArg {
    Tr,
    En,
    De,
    Fr,
    Es,
    It,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Tr => Language::Turkish,
            LangArg::En => Language::English,
            LangArg::De => Language::German,
            LangArg::Fr => Language::French,
            LangArg::Es => Language::Spanish,
            LangArg::It => Language::Italian,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) Komut satırı argümanları; --help ortamdan bağımsız çalışmalı
    let args = Args::parse();
    logging::init();

    // 2) Ayarları .env / ortam değişkenlerinden oku
    let config = Config::from_env()?;
    let pipeline = Pipeline::from_config(&config)?;

    // 3) Argümanları oturuma uygula
    let mut session = Session::new();
    session = shell::transition(session, ShellEvent::UrlEntered(args.url));
    session = shell::transition(session, ShellEvent::FormatChosen(args.format.into()));
    session = shell::transition(session, ShellEvent::LanguageChosen(args.lang.into()));

    // 4) Özetle
    println!("⏳ Sayfa çekiliyor ve özetleniyor...");
    let session = shell::run(session, &pipeline).await;

    if let Some(warning) = &session.warning {
        eprintln!("⚠️ {}", warning);
    }

    // 5) Sonucu yaz
    match &session.state {
        ShellState::Result(out) => {
            println!("\n📌 Özet:\n{}\n", out.summary.summary_text);
            let path = utils::save_export(&out.export, &args.out_dir)?;
            println!(
                "Özet başarıyla oluşturuldu ve indirilmeye hazır: `{}`",
                path.display()
            );
            Ok(())
        }
        ShellState::Error(message) => Err(message.clone().into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_pdf_in_turkish() {
        let args = Args::try_parse_from(["summary_service_cli", "--url", "https://example.com"]).unwrap();
        assert_eq!(ExportFormat::from(args.format), ExportFormat::Pdf);
        assert_eq!(Language::from(args.lang), Language::Turkish);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }

    #[test]
    fn help_and_bad_values_are_answered_by_the_parser() {
        // Parsing happens before any configuration is read, so these never
        // depend on the environment.
        let help = Args::try_parse_from(["summary_service_cli", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let bad = Args::try_parse_from(["summary_service_cli", "-u", "https://example.com", "-f", "odt"])
            .unwrap_err();
        assert_eq!(bad.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn short_flags_map_to_library_types() {
        let args =
            Args::try_parse_from(["summary_service_cli", "-u", "https://example.com", "-f", "docx", "-l", "de"])
                .unwrap();
        assert_eq!(ExportFormat::from(args.format), ExportFormat::Docx);
        assert_eq!(Language::from(args.lang), Language::German);
    }
}
