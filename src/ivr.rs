//! Calling widget state machine.
//!
//! Signalling is delegated to a [`SipAgent`]; the widget only tracks which
//! state the session is in, rejects actions that make no sense in that
//! state and turns agent events into state changes.
//!
//! The server itself only hands out [`SipConfig`]; [`CallWidget`] is the
//! library seam a client-side agent drives.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection settings for the SIP-over-WebSocket signalling server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SipConfig {
    pub ws_url: String,
    pub uri: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SipConfig {
    pub fn is_configured(&self) -> bool {
        !self.ws_url.trim().is_empty() && !self.uri.trim().is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallState {
    #[default]
    Idle,
    Connecting,
    Registered,
    Calling,
    Active,
    Failed,
}

impl CallState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallState::Idle => "idle",
            CallState::Connecting => "connecting",
            CallState::Registered => "registered",
            CallState::Calling => "calling",
            CallState::Active => "active",
            CallState::Failed => "failed",
        }
    }

    /// Whether `action` may be taken while in this state.
    pub fn allows(self, action: CallAction) -> bool {
        match (self, action) {
            (CallState::Idle | CallState::Registered | CallState::Failed, CallAction::Connect) => {
                true
            }
            (CallState::Registered, CallAction::Call) => true,
            (CallState::Calling | CallState::Active, CallAction::Hangup) => true,
            (CallState::Active, CallAction::SendDtmf) => true,
            (CallState::Idle, CallAction::Disconnect) => false,
            (_, CallAction::Disconnect) => true,
            _ => false,
        }
    }

    /// Actions offered by the widget in this state.
    pub fn allowed_actions(self) -> Vec<CallAction> {
        CallAction::ALL
            .into_iter()
            .filter(|action| self.allows(*action))
            .collect()
    }
}

impl Display for CallState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallAction {
    Connect,
    Call,
    Hangup,
    SendDtmf,
    Disconnect,
}

impl CallAction {
    pub const ALL: [CallAction; 5] = [
        CallAction::Connect,
        CallAction::Call,
        CallAction::Hangup,
        CallAction::SendDtmf,
        CallAction::Disconnect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallAction::Connect => "connect",
            CallAction::Call => "call",
            CallAction::Hangup => "hangup",
            CallAction::SendDtmf => "send_dtmf",
            CallAction::Disconnect => "disconnect",
        }
    }
}

impl Display for CallAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notifications raised by the signalling library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    Registered,
    RegistrationFailed(String),
    /// The remote side answered.
    Confirmed,
    /// The call could not be established.
    CallFailed(String),
    /// An established call was ended by either side.
    Ended,
    /// The transport to the signalling server closed.
    Disconnected,
}

impl Display for AgentEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentEvent::Registered => write!(f, "registered"),
            AgentEvent::RegistrationFailed(reason) => write!(f, "registration failed: {reason}"),
            AgentEvent::Confirmed => write!(f, "confirmed"),
            AgentEvent::CallFailed(reason) => write!(f, "call failed: {reason}"),
            AgentEvent::Ended => write!(f, "ended"),
            AgentEvent::Disconnected => write!(f, "disconnected"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("sip agent error: {0}")]
pub struct SipError(pub String);

/// Seam to the external SIP library.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait SipAgent {
    fn start(&mut self, config: &SipConfig) -> Result<(), SipError>;
    fn call(&mut self, target: &str) -> Result<(), SipError>;
    fn hangup(&mut self) -> Result<(), SipError>;
    fn send_dtmf(&mut self, digit: char) -> Result<(), SipError>;
    fn stop(&mut self) -> Result<(), SipError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IvrError {
    #[error("cannot {action} while {state}")]
    InvalidAction { action: CallAction, state: CallState },
    #[error("unexpected event '{event}' while {state}")]
    UnexpectedEvent { event: String, state: CallState },
    #[error("'{0}' is not a DTMF digit")]
    InvalidDigit(char),
    #[error("nothing to dial")]
    EmptyTarget,
    #[error("signalling server is not configured")]
    NotConfigured,
    #[error(transparent)]
    Agent(#[from] SipError),
}

pub fn is_dtmf_digit(digit: char) -> bool {
    digit.is_ascii_digit() || digit == '*' || digit == '#'
}

/// The calling widget: current state plus the session it drives.
pub struct CallWidget<A: SipAgent> {
    agent: A,
    config: SipConfig,
    state: CallState,
    target: Option<String>,
    dtmf_sent: String,
    last_error: Option<String>,
}

impl<A: SipAgent> CallWidget<A> {
    pub fn new(agent: A, config: SipConfig) -> Self {
        Self {
            agent,
            config,
            state: CallState::Idle,
            target: None,
            dtmf_sent: String::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Digits forwarded during the current (or last) call.
    pub fn dtmf_sent(&self) -> &str {
        &self.dtmf_sent
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn ensure_allowed(&self, action: CallAction) -> Result<(), IvrError> {
        if self.state.allows(action) {
            Ok(())
        } else {
            Err(IvrError::InvalidAction {
                action,
                state: self.state,
            })
        }
    }

    fn fail(&mut self, err: SipError) -> IvrError {
        log::warn!("Call widget failed while {}: {err}", self.state);
        self.state = CallState::Failed;
        self.last_error = Some(err.0.clone());
        IvrError::Agent(err)
    }

    /// Starts (or restarts) the session with the signalling server.
    pub fn connect(&mut self) -> Result<(), IvrError> {
        self.ensure_allowed(CallAction::Connect)?;
        if !self.config.is_configured() {
            return Err(IvrError::NotConfigured);
        }
        if self.state == CallState::Registered {
            self.agent.stop()?;
        }
        self.state = CallState::Connecting;
        self.last_error = None;
        if let Err(err) = self.agent.start(&self.config) {
            return Err(self.fail(err));
        }
        Ok(())
    }

    pub fn call(&mut self, target: &str) -> Result<(), IvrError> {
        self.ensure_allowed(CallAction::Call)?;
        let target = target.trim();
        if target.is_empty() {
            return Err(IvrError::EmptyTarget);
        }
        self.state = CallState::Calling;
        self.target = Some(target.to_string());
        self.dtmf_sent.clear();
        if let Err(err) = self.agent.call(target) {
            return Err(self.fail(err));
        }
        Ok(())
    }

    pub fn hangup(&mut self) -> Result<(), IvrError> {
        self.ensure_allowed(CallAction::Hangup)?;
        self.agent.hangup()?;
        self.state = CallState::Registered;
        Ok(())
    }

    /// Forwards DTMF digits to the active call. The whole string is checked
    /// before anything is sent.
    pub fn send_dtmf(&mut self, digits: &str) -> Result<(), IvrError> {
        self.ensure_allowed(CallAction::SendDtmf)?;
        if let Some(bad) = digits.chars().find(|c| !is_dtmf_digit(*c)) {
            return Err(IvrError::InvalidDigit(bad));
        }
        for digit in digits.chars() {
            self.agent.send_dtmf(digit)?;
            self.dtmf_sent.push(digit);
        }
        Ok(())
    }

    pub fn disconnect(&mut self) -> Result<(), IvrError> {
        self.ensure_allowed(CallAction::Disconnect)?;
        if matches!(self.state, CallState::Calling | CallState::Active) {
            self.agent.hangup()?;
        }
        self.agent.stop()?;
        self.state = CallState::Idle;
        self.target = None;
        Ok(())
    }

    /// Applies an event reported by the agent.
    pub fn handle_event(&mut self, event: AgentEvent) -> Result<CallState, IvrError> {
        let next = match (self.state, &event) {
            (CallState::Connecting, AgentEvent::Registered) => CallState::Registered,
            (CallState::Connecting, AgentEvent::RegistrationFailed(reason))
            | (CallState::Calling, AgentEvent::CallFailed(reason)) => {
                self.last_error = Some(reason.clone());
                CallState::Failed
            }
            (CallState::Calling, AgentEvent::Confirmed) => CallState::Active,
            (CallState::Calling | CallState::Active, AgentEvent::Ended) => CallState::Registered,
            (CallState::Connecting | CallState::Calling, AgentEvent::Disconnected) => {
                self.last_error = Some("connection lost".to_string());
                CallState::Failed
            }
            (_, AgentEvent::Disconnected) => CallState::Idle,
            (state, event) => {
                return Err(IvrError::UnexpectedEvent {
                    event: event.to_string(),
                    state,
                });
            }
        };
        log::debug!("Call widget {} -> {next} on {event}", self.state);
        self.state = next;
        Ok(next)
    }
}
