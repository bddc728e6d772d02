//! 命令行定义与各子命令实现。
//!
//! 记录选项统一经由 `FormRuntime` 构建：种子记录或 `--record` JSON，
//! 再依次应用 `--set` 与 `--photo`，与表单里逐步编辑的效果一致。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use signature_studio::clipboard::{CopyConfig, SystemClipboardProvider, DEFAULT_ACK_MS};
use signature_studio::error::AppError;
use signature_studio::export::{export_signature, ExportTarget};
use signature_studio::form::{FormMessage, FormRuntime, FormSession};
use signature_studio::signature::{RecordField, SignatureRecord};
use signature_studio::thumbnail::{ThumbnailConfig, ThumbnailHandler, ThumbnailProfile};

/// Email signature builder
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the signature HTML, or write it to a file
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        record: RecordArgs,

        /// Write the fragment to this file
        #[arg(long, value_hint = clap::ValueHint::FilePath, conflicts_with = "out_dir")]
        out: Option<PathBuf>,

        /// Write the fragment to a timestamped file in this directory
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        out_dir: Option<PathBuf>,
    },

    /// Copy the signature to the clipboard
    #[command(visible_alias = "c")]
    Copy {
        #[command(flatten)]
        record: RecordArgs,

        /// How long the "copied" acknowledgement stays visible
        #[arg(long, default_value_t = DEFAULT_ACK_MS)]
        ack_ms: u64,
    },

    /// Shrink an image and print it as a JPEG data URL
    Thumbnail {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        image: PathBuf,

        /// Longest output edge in pixels (at least 1)
        #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
        max_size: u32,

        /// JPEG quality in (0, 1]
        #[arg(long, default_value_t = 0.82)]
        quality: f32,

        /// Resize profile (quality, balanced, speed)
        #[arg(long, value_parser = ThumbnailProfile::from_str)]
        profile: Option<ThumbnailProfile>,
    },

    /// Print the sample record as JSON
    Seed,
}

/// Options that build the signature record.
#[derive(clap::Args, Debug, Clone)]
pub struct RecordArgs {
    /// JSON record file (defaults to the sample record)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub record: Option<PathBuf>,

    /// Field edit, applied in order (e.g. --set title="Head of Sales")
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(RecordField, String)>,

    /// Photo to embed as the avatar
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub photo: Option<PathBuf>,

    /// Resize profile for --photo
    #[arg(long, value_parser = ThumbnailProfile::from_str)]
    pub profile: Option<ThumbnailProfile>,
}

fn parse_assignment(raw: &str) -> Result<(RecordField, String), AppError> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::Record(format!("'{}' 缺少 '='，应为 FIELD=VALUE", raw)))?;
    Ok((field.trim().parse()?, value.to_string()))
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Render {
            record,
            out,
            out_dir,
        } => {
            let runtime = build_runtime(&record, CopyConfig::default()).await?;
            let html = runtime.session().signature_html();

            let target = match (out, out_dir) {
                (Some(path), _) => Some(ExportTarget::File(path)),
                (None, Some(dir)) => Some(ExportTarget::Directory(dir)),
                (None, None) => None,
            };
            match target {
                Some(target) => {
                    let path = export_signature(html, &target)?;
                    println!("{}", path.display());
                }
                None => println!("{}", html),
            }
            Ok(())
        }
        Commands::Copy { record, ack_ms } => {
            let copy_config = CopyConfig {
                ack_duration: Duration::from_millis(ack_ms),
            };
            let mut runtime = build_runtime(&record, copy_config).await?;
            runtime.dispatch(FormMessage::CopyRequested);

            let copied = runtime
                .next_event()
                .await
                .map(FormSession::copied)
                .unwrap_or(false);
            if !copied {
                return Err(AppError::Clipboard("所有复制方式均失败".to_string()));
            }

            println!("✅ 签名已复制");
            runtime.run_until_idle().await;
            Ok(())
        }
        Commands::Thumbnail {
            image,
            max_size,
            quality,
            profile,
        } => {
            let handler = ThumbnailHandler::new(ThumbnailConfig {
                max_dimension: max_size,
                quality,
                ..ThumbnailConfig::default()
            });
            if let Some(profile) = profile {
                handler.set_profile(profile)?;
            }

            println!("{}", handler.resize_to_data_url(&image).await?);
            Ok(())
        }
        Commands::Seed => {
            let json = serde_json::to_string_pretty(&SignatureRecord::seed())
                .map_err(|e| AppError::Record(format!("序列化示例记录失败: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}

async fn build_runtime(args: &RecordArgs, copy_config: CopyConfig) -> Result<FormRuntime, AppError> {
    let record = match &args.record {
        Some(path) => SignatureRecord::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SignatureRecord::seed(),
    };

    let thumbnails = ThumbnailHandler::default();
    if let Some(profile) = args.profile {
        thumbnails.set_profile(profile)?;
    }

    let mut runtime = FormRuntime::new(
        FormSession::with_copy_config(record, copy_config),
        thumbnails,
        Arc::new(SystemClipboardProvider::new(copy_config.ack_duration)),
    );

    for (field, value) in &args.set {
        runtime.dispatch(FormMessage::FieldChanged {
            field: *field,
            value: value.clone(),
        });
    }

    if let Some(photo) = &args.photo {
        runtime.dispatch(FormMessage::PhotoSelected(photo.clone()));
        runtime.run_until_idle().await;
    }

    if let Some(notice) = runtime.session().notice() {
        eprintln!("⚠️ {}", notice.message);
        runtime.dispatch(FormMessage::DismissNotice);
    }

    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        let (field, value) = parse_assignment("website1=https://x.test/?a=b").expect("valid assignment");
        assert_eq!(field, RecordField::Website1);
        assert_eq!(value, "https://x.test/?a=b");
    }

    #[test]
    fn assignment_accepts_empty_value() {
        let (field, value) = parse_assignment("address1=").expect("valid assignment");
        assert_eq!(field, RecordField::Address1);
        assert!(value.is_empty());
    }

    #[test]
    fn assignment_rejects_unknown_field_and_missing_equals() {
        assert!(matches!(parse_assignment("fax=1"), Err(AppError::Record(_))));
        assert!(matches!(parse_assignment("name"), Err(AppError::Record(_))));
    }

    #[test]
    fn cli_parses_repeated_set_flags() {
        let cli = Cli::try_parse_from([
            "signature-studio",
            "render",
            "--set",
            "name=Ada",
            "--set",
            "surname=Lovelace",
        ])
        .expect("arguments should parse");

        match cli.command {
            Commands::Render { record, out, out_dir } => {
                assert_eq!(record.set.len(), 2);
                assert!(out.is_none() && out_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn zero_thumbnail_size_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["signature-studio", "thumbnail", "me.png", "--max-size", "0"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["signature-studio", "thumbnail", "me.png", "--max-size", "1"])
            .expect("one pixel is a valid bound");
        assert!(matches!(cli.command, Commands::Thumbnail { max_size: 1, .. }));
    }

    #[test]
    fn out_and_out_dir_conflict() {
        let result = Cli::try_parse_from([
            "signature-studio",
            "render",
            "--out",
            "a.html",
            "--out-dir",
            "dir",
        ]);
        assert!(result.is_err());
    }
}
