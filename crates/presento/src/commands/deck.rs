//! Authoring commands: one deck action per invocation.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use super::open_session;
use crate::cli::EditArgs;
use crate::deck::model::commit_name;
use crate::deck::navigation::ordinal;
use crate::deck::{DeckAction, Position, Slide, SlideBody};
use crate::session::Session;
use crate::storage::KeyValueStore;

pub fn list(data_dir: Option<PathBuf>) -> Result<()> {
    let session = open_session(data_dir)?;
    let state = session.state();
    println!("{}", state.deck.name().bold());
    for (index, slide) in state.deck.slides().iter().enumerate() {
        let marker = if index == state.current_index() {
            "▸".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{marker} {:>3}. {}  {}  {}",
            ordinal(index),
            slide.display_title(),
            format!("[{}]", slide.layout()).cyan(),
            slide.id.as_str().dimmed()
        );
    }
    Ok(())
}

pub fn show(data_dir: Option<PathBuf>, position: Option<Position>) -> Result<()> {
    let session = open_session(data_dir)?;
    let index = target_index(&session, position.as_ref());
    let Some(slide) = session.state().deck.get(index) else {
        anyhow::bail!("No slide at position {}", ordinal(index));
    };
    print_slide(index, slide);
    Ok(())
}

fn print_slide(index: usize, slide: &Slide) {
    println!(
        "{} {}  {}",
        format!("Slide {}", ordinal(index)).bold(),
        format!("[{}]", slide.layout()).cyan(),
        slide.id.as_str().dimmed()
    );
    println!("  {:<8} {}", "title:".dimmed(), slide.title.as_deref().unwrap_or(""));
    match &slide.body {
        SlideBody::Bullets { items } => {
            for item in items {
                println!("  • {item}");
            }
        }
        SlideBody::ImageCenter {
            content,
            image,
            fit,
            scale,
        } => {
            print_field("content:", content.as_deref());
            print_field("image:", image.as_deref());
            print_field("fit:", Some(fit.unwrap_or_default().name()));
            let scale = scale.unwrap_or(crate::deck::slide::DEFAULT_IMAGE_SCALE);
            print_field("scale:", Some(format!("{scale}%").as_str()));
        }
        SlideBody::Code { content, code } => {
            print_field("content:", content.as_deref());
            if let Some(code) = code {
                println!("  {}", "code:".dimmed());
                for line in code.lines() {
                    println!("    {line}");
                }
            }
        }
        SlideBody::Title { content } | SlideBody::Blank { content } => {
            print_field("content:", content.as_deref());
        }
    }
    if let Some(notes) = slide.notes.as_deref().filter(|n| !n.is_empty()) {
        println!("  {} {}", "notes:".yellow(), notes);
    }
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        println!("  {:<8} {}", label.dimmed(), value);
    }
}

pub fn add(data_dir: Option<PathBuf>, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    session.dispatch(DeckAction::AddSlide)?;
    if !quiet {
        let state = session.state();
        println!(
            "{}",
            format!(
                "Added slide {} of {}",
                ordinal(state.current_index()),
                state.deck.len()
            )
            .green()
        );
    }
    Ok(())
}

pub fn select(data_dir: Option<PathBuf>, position: Position, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    session.dispatch(DeckAction::Select(position))?;
    if !quiet {
        let state = session.state();
        println!(
            "Slide {} of {}: {}",
            ordinal(state.current_index()),
            state.deck.len(),
            state.current_slide().display_title()
        );
    }
    Ok(())
}

/// Builds the edited slide in memory and only dispatches once every flag has
/// been accepted, so a rejected edit leaves the stored deck alone.
pub fn edit(data_dir: Option<PathBuf>, args: EditArgs, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    let position = args.slide.position();
    let index = existing_index(&session, position.as_ref())?;
    let Some(mut slide) = session.state().deck.get(index).cloned() else {
        anyhow::bail!("No slide at position {}", ordinal(index));
    };
    if let Some(layout) = args.layout {
        slide = slide.with_layout(layout);
    }
    let slide = apply_edit(slide, &args)?;

    session.dispatch(DeckAction::UpdateSlide(slide))?;
    if let Some(position) = position {
        session.dispatch(DeckAction::Select(position))?;
    }
    if !quiet {
        println!(
            "{}",
            format!("Updated slide {}", ordinal(session.state().current_index())).green()
        );
    }
    Ok(())
}

/// Apply the field flags of `args` to `slide`. Layout changes happen before this.
pub fn apply_edit(mut slide: Slide, args: &EditArgs) -> Result<Slide> {
    if let Some(title) = &args.title {
        slide.title = Some(title.clone());
    }
    if let Some(notes) = &args.notes {
        slide.notes = Some(notes.clone()).filter(|n| !n.is_empty());
    }
    if let Some(content) = &args.content {
        slide.set_content(content);
    } else if !args.bullet.is_empty() {
        match &mut slide.body {
            SlideBody::Bullets { items } => items.clone_from(&args.bullet),
            _ => slide.set_content(&args.bullet.join("\n")),
        }
    }

    let layout = slide.layout();
    match &mut slide.body {
        SlideBody::ImageCenter {
            image, fit, scale, ..
        } => {
            if args.image.is_some() {
                image.clone_from(&args.image);
            }
            if args.image_fit.is_some() {
                *fit = args.image_fit;
            }
            if args.image_scale.is_some() {
                *scale = args.image_scale;
            }
        }
        _ if args.image.is_some() || args.image_fit.is_some() || args.image_scale.is_some() => {
            anyhow::bail!("Image options only apply to image-center slides (this one is {layout})")
        }
        _ => {}
    }
    match &mut slide.body {
        SlideBody::Code { code, .. } => {
            if args.code.is_some() {
                code.clone_from(&args.code);
            }
        }
        _ if args.code.is_some() => {
            anyhow::bail!("--code only applies to code slides (this one is {layout})")
        }
        _ => {}
    }
    Ok(slide)
}

pub fn delete(data_dir: Option<PathBuf>, position: Option<Position>, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    let index = existing_index(&session, position.as_ref())?;
    let Some(id) = session.state().deck.get(index).map(|s| s.id.clone()) else {
        anyhow::bail!("No slide at position {}", ordinal(index));
    };
    let effects = session.dispatch(DeckAction::DeleteSlide { id })?;
    if quiet {
        return Ok(());
    }
    if effects.is_empty() {
        println!("{}", "A deck keeps at least one slide; nothing deleted.".dimmed());
    } else {
        let state = session.state();
        println!(
            "{}",
            format!(
                "Deleted. Now on slide {} of {}",
                ordinal(state.current_index()),
                state.deck.len()
            )
            .green()
        );
    }
    Ok(())
}

pub fn move_slide(data_dir: Option<PathBuf>, from: usize, to: usize, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    let len = session.state().deck.len();
    for pos in [from, to] {
        if pos == 0 || pos > len {
            anyhow::bail!("Position {pos} is outside the deck (1-{len})");
        }
    }
    let effects = session.dispatch(DeckAction::Reorder {
        from: from - 1,
        to: to - 1,
    })?;
    if !quiet && !effects.is_empty() {
        println!("{}", format!("Moved slide {from} to {to}").green());
    }
    Ok(())
}

pub fn rename(data_dir: Option<PathBuf>, name: &str, quiet: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    session.dispatch(DeckAction::Rename {
        name: commit_name(name),
    })?;
    if !quiet {
        println!(
            "{}",
            format!("Renamed to \"{}\"", session.state().deck.name()).green()
        );
    }
    Ok(())
}

fn target_index<S: KeyValueStore>(session: &Session<S>, position: Option<&Position>) -> usize {
    let state = session.state();
    position.map_or(state.current_index(), |p| p.resolve(&state.deck))
}

/// Strict lookup for commands that change a slide: unlike navigation, a
/// malformed or out-of-range position is an error rather than clamped.
fn existing_index<S: KeyValueStore>(
    session: &Session<S>,
    position: Option<&Position>,
) -> Result<usize> {
    let state = session.state();
    let len = state.deck.len();
    match position {
        None => Ok(state.current_index()),
        Some(Position::Id(id)) => state
            .deck
            .index_of(id)
            .ok_or_else(|| anyhow::anyhow!("No slide with id {id}")),
        Some(Position::Ordinal(raw)) => match raw.trim().parse::<usize>() {
            Ok(pos) if (1..=len).contains(&pos) => Ok(pos - 1),
            _ => anyhow::bail!("Position {raw} is outside the deck (1-{len})"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SlideArg;
    use crate::deck::{ImageFit, Layout, SlideId};
    use crate::storage::{FileStore, NAME_KEY};

    fn slide(body: SlideBody) -> Slide {
        Slide {
            body,
            ..Slide::new(SlideId::new("s"))
        }
    }

    #[test]
    fn test_bullets_replace_items() {
        let args = EditArgs {
            bullet: vec!["one".into(), "two".into()],
            ..Default::default()
        };
        let edited = apply_edit(slide(SlideBody::Bullets { items: vec![] }), &args).unwrap();
        assert_eq!(
            edited.body,
            SlideBody::Bullets {
                items: vec!["one".into(), "two".into()]
            }
        );
    }

    #[test]
    fn test_bullets_on_text_slide_join_lines() {
        let args = EditArgs {
            bullet: vec!["one".into(), "two".into()],
            ..Default::default()
        };
        let edited = apply_edit(slide(SlideBody::Blank { content: None }), &args).unwrap();
        assert_eq!(edited.body.content_text().as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn test_image_options_need_image_layout() {
        let args = EditArgs {
            image_scale: Some(50),
            ..Default::default()
        };
        let err = apply_edit(slide(SlideBody::Title { content: None }), &args).unwrap_err();
        assert!(err.to_string().contains("image-center"));

        let image = Slide::new(SlideId::new("i")).with_layout(Layout::ImageCenter);
        let args = EditArgs {
            image: Some("https://example.com/a.png".into()),
            image_fit: Some(ImageFit::Cover),
            image_scale: Some(50),
            ..Default::default()
        };
        let edited = apply_edit(image, &args).unwrap();
        let SlideBody::ImageCenter {
            image, fit, scale, ..
        } = edited.body
        else {
            panic!("layout changed");
        };
        assert_eq!(image.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(fit, Some(ImageFit::Cover));
        assert_eq!(scale, Some(50));
    }

    #[test]
    fn test_empty_notes_clear() {
        let mut s = slide(SlideBody::Title { content: None });
        s.notes = Some("remember".into());
        let args = EditArgs {
            notes: Some(String::new()),
            slide: SlideArg::default(),
            ..Default::default()
        };
        assert_eq!(apply_edit(s, &args).unwrap().notes, None);
    }

    fn deck_dir() -> (tempfile::TempDir, Option<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let path = Some(dir.path().join("deck"));
        (dir, path)
    }

    fn ordinal_arg(pos: &str) -> SlideArg {
        SlideArg {
            pos: Some(pos.to_string()),
            id: None,
        }
    }

    #[test]
    fn test_rejected_edit_leaves_stored_deck_alone() {
        let (_dir, data_dir) = deck_dir();
        add(data_dir.clone(), true).unwrap();
        let before = open_session(data_dir.clone()).unwrap().state().clone();

        let args = EditArgs {
            slide: ordinal_arg("3"),
            layout: Some(Layout::Bullets),
            code: Some("x".into()),
            ..Default::default()
        };
        assert!(edit(data_dir.clone(), args, true).is_err());

        let after = open_session(data_dir).unwrap();
        assert_eq!(after.state(), &before);
        let SlideBody::Code { code, .. } = &after.state().deck.slides()[2].body else {
            panic!("layout changed");
        };
        assert!(code.is_some());
    }

    #[test]
    fn test_edit_switches_layout_and_selects_slide() {
        let (_dir, data_dir) = deck_dir();
        let args = EditArgs {
            slide: ordinal_arg("3"),
            layout: Some(Layout::Bullets),
            bullet: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        edit(data_dir.clone(), args, true).unwrap();

        let session = open_session(data_dir).unwrap();
        assert_eq!(session.state().current_index(), 2);
        assert_eq!(
            session.state().current_slide().body,
            SlideBody::Bullets {
                items: vec!["a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn test_delete_rejects_positions_outside_deck() {
        let (_dir, data_dir) = deck_dir();
        for pos in ["oops", "0", "99", "-1"] {
            let position = Some(Position::Ordinal(pos.to_string()));
            let err = delete(data_dir.clone(), position, true).unwrap_err();
            assert!(err.to_string().contains("outside the deck"), "{pos}: {err}");
        }
        let unknown = Some(Position::Id(SlideId::new("missing")));
        let err = delete(data_dir.clone(), unknown, true).unwrap_err();
        assert!(err.to_string().contains("No slide with id missing"));
        assert_eq!(open_session(data_dir.clone()).unwrap().state().deck.len(), 3);

        delete(data_dir.clone(), Some(Position::Ordinal("2".into())), true).unwrap();
        let session = open_session(data_dir).unwrap();
        let ids: Vec<&str> = session
            .state()
            .deck
            .slides()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_rename_stores_trimmed_name_once() {
        let (_dir, data_dir) = deck_dir();
        rename(data_dir.clone(), "  Roadmap  ", true).unwrap();
        let store = FileStore::new(data_dir.clone().unwrap());
        assert_eq!(store.get(NAME_KEY).unwrap().as_deref(), Some("Roadmap"));

        rename(data_dir.clone(), "   ", true).unwrap();
        assert_eq!(store.get(NAME_KEY).unwrap().as_deref(), Some("Slides"));
    }
}
