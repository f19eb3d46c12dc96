use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlVideoElement};

use crate::dom::{self, Disposer, Listener};

pub const CARD_SELECTOR: &str = ".video-card";
pub const OVERLAY_SELECTOR: &str = ".video-overlay";
const PLAYING_CLASS: &str = "playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    Play(usize),
    Pause(usize),
}

/// Commands for a click on card `clicked`, given which videos are paused.
/// Only one testimonial plays at a time.
pub fn plan_toggle(paused: &[bool], clicked: usize) -> Vec<VideoCommand> {
    let mut commands: Vec<VideoCommand> = (0..paused.len())
        .filter(|&i| i != clicked)
        .map(VideoCommand::Pause)
        .collect();
    match paused.get(clicked) {
        Some(true) => commands.push(VideoCommand::Play(clicked)),
        Some(false) => commands.push(VideoCommand::Pause(clicked)),
        None => {}
    }
    commands
}

struct Card {
    card: Element,
    video: HtmlVideoElement,
}

struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    fn toggle(&self, clicked: usize) {
        let paused: Vec<bool> = self.cards.iter().map(|c| c.video.paused()).collect();
        for command in plan_toggle(&paused, clicked) {
            match command {
                VideoCommand::Play(i) => {
                    let card = &self.cards[i];
                    if let Err(e) = card.video.play() {
                        warn!("Video refused to play: {:?}", e);
                        continue;
                    }
                    dom::add_class(&card.card, PLAYING_CLASS);
                    card.video.set_controls(true);
                }
                VideoCommand::Pause(i) => {
                    let card = &self.cards[i];
                    if let Err(e) = card.video.pause() {
                        warn!("Failed to pause video: {:?}", e);
                    }
                    dom::remove_class(&card.card, PLAYING_CLASS);
                }
            }
        }
    }
}

pub fn bind(document: &Document) -> Disposer {
    let mut disposer = Disposer::new();
    let cards: Vec<Card> = dom::select_all(document, CARD_SELECTOR)
        .into_iter()
        .filter_map(|card| {
            let video = card
                .query_selector("video")
                .ok()
                .flatten()?
                .dyn_into::<HtmlVideoElement>()
                .ok()?;
            Some(Card { card, video })
        })
        .collect();
    if cards.is_empty() {
        return disposer;
    }

    for card in &cards {
        let element = card.card.clone();
        let video = card.video.clone();
        disposer.keep(
            "video ended",
            Listener::new(&card.video, "ended", move |_| {
                dom::remove_class(&element, PLAYING_CLASS);
                video.set_controls(false);
            }),
        );
    }

    let deck = Rc::new(Deck { cards });
    for (index, card) in deck.cards.iter().enumerate() {
        for overlay in dom::select_all_within(&card.card, OVERLAY_SELECTOR) {
            let deck = deck.clone();
            disposer.keep(
                "video overlay",
                Listener::new(&overlay, "click", move |_| deck.toggle(index)),
            );
        }
    }

    disposer
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clicking_paused_video_pauses_the_rest() {
        assert_eq!(
            plan_toggle(&[false, true, true], 1),
            vec![VideoCommand::Pause(0), VideoCommand::Pause(2), VideoCommand::Play(1)]
        );
    }

    #[test]
    fn clicking_playing_video_pauses_it() {
        assert_eq!(
            plan_toggle(&[false, true], 0),
            vec![VideoCommand::Pause(1), VideoCommand::Pause(0)]
        );
    }

    #[test]
    fn unknown_index_only_pauses() {
        assert_eq!(plan_toggle(&[true], 3), vec![VideoCommand::Pause(0)]);
    }
}
