//! WASM boundary. One global game session; the JS shell drives it with
//! `select_piece` / `attempt_move` / `automated_move` / `restart` and
//! observes it through the two registered callbacks.
//!
//! The shell owns scheduling: when a `BoardChanged` snapshot says it is
//! Green's turn, the shell arms a `setTimeout` that calls
//! `automated_move(epoch)`. The epoch is bumped on every restart, so a
//! timer armed before a restart misses and does nothing.

use std::cell::RefCell;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::game::GameInstance;
use crate::types::{EngineEvent, Position};

struct Session {
    game: GameInstance,
    epoch: u32,
}

impl Session {
    fn new() -> Self {
        Self {
            game: GameInstance::new_with_default_selector(),
            epoch: 0,
        }
    }
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::new()));

thread_local! {
    static ON_BOARD_CHANGED: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
    static ON_GAME_OVER: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

/// Runs `op` under the session lock, then dispatches the events it
/// queued. Dispatch happens after the lock is released so a callback
/// may re-enter the API.
fn with_session<T>(op: impl FnOnce(&mut Session) -> T) -> Result<T, JsValue> {
    let (out, events, epoch) = {
        let mut session = SESSION
            .lock()
            .map_err(|_| JsValue::from_str("game session lock poisoned"))?;
        let out = op(&mut session);
        (out, session.game.take_events(), session.epoch)
    };
    dispatch_events(events, epoch)?;
    Ok(out)
}

fn dispatch_events(events: Vec<EngineEvent>, epoch: u32) -> Result<(), JsValue> {
    for event in events {
        match event {
            EngineEvent::BoardChanged(state) => {
                let payload = serde_wasm_bindgen::to_value(&state)?;
                // Clone the handle out so a callback may re-register itself.
                let callback = ON_BOARD_CHANGED.with(|slot| slot.borrow().clone());
                if let Some(f) = callback {
                    let _ = f.call2(&JsValue::NULL, &payload, &JsValue::from(epoch));
                }
            }
            EngineEvent::GameOver(result) => {
                let payload = serde_wasm_bindgen::to_value(&result)?;
                let callback = ON_GAME_OVER.with(|slot| slot.borrow().clone());
                if let Some(f) = callback {
                    let _ = f.call1(&JsValue::NULL, &payload);
                }
            }
        }
    }
    Ok(())
}

/// Registers the re-render callback, called with `(state, epoch)`.
/// Pass `undefined` to clear it.
#[wasm_bindgen]
pub fn set_on_board_changed(callback: Option<js_sys::Function>) {
    ON_BOARD_CHANGED.with(|slot| *slot.borrow_mut() = callback);
}

/// Registers the game-over callback, called with the final result.
#[wasm_bindgen]
pub fn set_on_game_over(callback: Option<js_sys::Function>) {
    ON_GAME_OVER.with(|slot| *slot.borrow_mut() = callback);
}

/// Starts a fresh game, invalidating any pending automated-move timer
/// from the previous one. Returns the new epoch.
#[wasm_bindgen]
pub fn restart() -> Result<u32, JsValue> {
    with_session(|session| {
        session.epoch = session.epoch.wrapping_add(1);
        session.game.restart();
        session.epoch
    })
}

/// Returns whether the selection was accepted. Clicks on empty squares,
/// opponent pieces, or off-board coordinates are ordinary rejections.
#[wasm_bindgen]
pub fn select_piece(row: u8, col: u8) -> Result<bool, JsValue> {
    with_session(|session| session.game.select_piece(Position { row, col }))
}

/// Returns whether the move was accepted.
#[wasm_bindgen]
pub fn attempt_move(row: u8, col: u8) -> Result<bool, JsValue> {
    with_session(|session| session.game.attempt_move(Position { row, col }))
}

/// Runs Green's policy. Returns the move made, or `null` when Green
/// had no legal move or `epoch` is stale.
#[wasm_bindgen]
pub fn automated_move(epoch: u32) -> Result<JsValue, JsValue> {
    let applied = with_session(|session| {
        if session.epoch != epoch {
            return None;
        }
        session.game.automated_move()
    })?;

    match applied {
        Some(mv) => Ok(serde_wasm_bindgen::to_value(&mv)?),
        None => Ok(JsValue::NULL),
    }
}

/// Pull-style snapshot of the current state.
#[wasm_bindgen]
pub fn game_state() -> Result<JsValue, JsValue> {
    let state = with_session(|session| session.game.to_game_state())?;
    Ok(serde_wasm_bindgen::to_value(&state)?)
}

#[wasm_bindgen]
pub fn current_epoch() -> Result<u32, JsValue> {
    with_session(|session| session.epoch)
}
