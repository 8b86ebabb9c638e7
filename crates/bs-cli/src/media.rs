use bs_core::MediaKind;

use crate::{emit_media, CliError, MediaArgs, MediaCommand, MediaKindArg};

impl From<MediaKindArg> for MediaKind {
    fn from(kind: MediaKindArg) -> Self {
        match kind {
            MediaKindArg::Image => MediaKind::Image,
            MediaKindArg::Audio => MediaKind::Audio,
            MediaKindArg::Video => MediaKind::Video,
            MediaKindArg::None => MediaKind::None,
        }
    }
}

pub(super) fn run_media(args: MediaArgs) -> Result<i32, CliError> {
    match args.command {
        MediaCommand::Resolve(args) => {
            let media = bs_media::resolve(args.kind.into(), &args.url, args.transcript.as_deref());
            emit_media(&media)
        }
    }
}
