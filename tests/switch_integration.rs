// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scenario tests for switch behavior over a scripted transport.
//!
//! The transport scripts the outcome of every expected call and panics
//! on any call beyond the script, which pins down both the retry counts
//! and the "transport never touched" cases.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use broadr_lib::error::TransportError;
use broadr_lib::{
    CommandCode, DeviceIdentity, DeviceKind, DeviceSession, MacAddr, PowerState, Switch, Transport,
};

/// Call counters observable after the transport moves into the session.
#[derive(Default)]
struct Calls {
    authenticate: AtomicU32,
    send_packet: AtomicU32,
    set_power: AtomicU32,
    power_state: AtomicU32,
}

impl Calls {
    fn authenticate(&self) -> u32 {
        self.authenticate.load(Ordering::SeqCst)
    }

    fn send_packet(&self) -> u32 {
        self.send_packet.load(Ordering::SeqCst)
    }

    fn set_power(&self) -> u32 {
        self.set_power.load(Ordering::SeqCst)
    }

    fn power_state(&self) -> u32 {
        self.power_state.load(Ordering::SeqCst)
    }
}

/// Transport that plays back scripted results, one per expected call.
#[derive(Default)]
struct ScriptedTransport {
    calls: Arc<Calls>,
    auth_script: VecDeque<Result<(), TransportError>>,
    send_script: VecDeque<Result<(), TransportError>>,
    set_power_script: VecDeque<Result<(), TransportError>>,
    query_script: VecDeque<Result<Option<bool>, TransportError>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::default()
    }

    fn calls(&self) -> Arc<Calls> {
        Arc::clone(&self.calls)
    }

    fn auth_ok(mut self) -> Self {
        self.auth_script.push_back(Ok(()));
        self
    }

    fn auth_timeout(mut self) -> Self {
        self.auth_script.push_back(Err(TransportError::Timeout));
        self
    }

    fn send_ok(mut self) -> Self {
        self.send_script.push_back(Ok(()));
        self
    }

    fn send_timeout(mut self) -> Self {
        self.send_script.push_back(Err(TransportError::Timeout));
        self
    }

    fn set_power_ok(mut self) -> Self {
        self.set_power_script.push_back(Ok(()));
        self
    }

    fn set_power_timeout(mut self) -> Self {
        self.set_power_script.push_back(Err(TransportError::Timeout));
        self
    }

    fn query_state(mut self, state: bool) -> Self {
        self.query_script.push_back(Ok(Some(state)));
        self
    }

    fn query_indeterminate(mut self) -> Self {
        self.query_script.push_back(Ok(None));
        self
    }

    fn query_timeout(mut self) -> Self {
        self.query_script.push_back(Err(TransportError::Timeout));
        self
    }
}

impl Transport for ScriptedTransport {
    async fn authenticate(&mut self) -> Result<(), TransportError> {
        self.calls.authenticate.fetch_add(1, Ordering::SeqCst);
        self.auth_script
            .pop_front()
            .expect("unexpected authenticate call")
    }

    async fn send_packet(&mut self, _packet: &[u8]) -> Result<(), TransportError> {
        self.calls.send_packet.fetch_add(1, Ordering::SeqCst);
        self.send_script
            .pop_front()
            .expect("unexpected send_packet call")
    }

    async fn set_power(&mut self, _state: PowerState) -> Result<(), TransportError> {
        self.calls.set_power.fetch_add(1, Ordering::SeqCst);
        self.set_power_script
            .pop_front()
            .expect("unexpected set_power call")
    }

    async fn power_state(&mut self) -> Result<Option<bool>, TransportError> {
        self.calls.power_state.fetch_add(1, Ordering::SeqCst);
        self.query_script
            .pop_front()
            .expect("unexpected power_state call")
    }
}

fn session(kind: DeviceKind, transport: ScriptedTransport) -> Arc<DeviceSession<ScriptedTransport>> {
    let mac: MacAddr = "34:ea:34:12:ab:cd".parse().unwrap();
    Arc::new(DeviceSession::new(
        DeviceIdentity::new("192.168.1.23", mac, kind),
        transport,
    ))
}

fn code() -> CommandCode {
    CommandCode::from_base64("JgBGAA==").unwrap()
}

mod stored_switch {
    use super::*;

    #[tokio::test]
    async fn missing_off_code_succeeds_without_transport() {
        let transport = ScriptedTransport::new();
        let calls = transport.calls();
        let switch = Switch::stored("tv", session(DeviceKind::Rm, transport), Some(code()), None);

        switch.turn_off().await;

        assert!(!switch.is_on());
        assert_eq!(calls.send_packet(), 0);
        assert_eq!(calls.authenticate(), 0);
    }

    #[tokio::test]
    async fn timeout_once_then_success_turns_on() {
        let transport = ScriptedTransport::new().send_timeout().auth_ok().send_ok();
        let calls = transport.calls();
        let switch = Switch::stored("tv", session(DeviceKind::Rm, transport), Some(code()), None);

        switch.turn_on().await;

        assert!(switch.is_on());
        assert_eq!(calls.authenticate(), 1);
        assert_eq!(calls.send_packet(), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_leave_state_unchanged() {
        let transport = ScriptedTransport::new()
            .send_timeout()
            .auth_ok()
            .send_timeout()
            .auth_ok()
            .send_timeout();
        let calls = transport.calls();
        let switch = Switch::stored("tv", session(DeviceKind::Rm, transport), Some(code()), None);

        switch.turn_on().await;

        assert!(!switch.is_on());
        // budget 2: three transport attempts, one re-auth per consumed retry.
        assert_eq!(calls.send_packet(), 3);
        assert_eq!(calls.authenticate(), 2);
    }

    #[tokio::test]
    async fn failed_reauth_is_swallowed_and_retry_proceeds() {
        let transport = ScriptedTransport::new()
            .send_timeout()
            .auth_timeout()
            .send_timeout()
            .auth_timeout()
            .send_ok();
        let calls = transport.calls();
        let switch = Switch::stored("tv", session(DeviceKind::Rm, transport), Some(code()), None);

        switch.turn_on().await;

        assert!(switch.is_on());
        assert_eq!(calls.send_packet(), 3);
        assert_eq!(calls.authenticate(), 2);
    }

    #[tokio::test]
    async fn on_then_off_returns_to_original_state() {
        let transport = ScriptedTransport::new().send_ok().send_ok();
        let switch = Switch::stored(
            "tv",
            session(DeviceKind::Rm, transport),
            Some(code()),
            Some(code()),
        );

        switch.turn_on().await;
        assert!(switch.is_on());
        switch.turn_off().await;
        assert!(!switch.is_on());
    }

    #[tokio::test]
    async fn failed_turn_off_keeps_switch_on() {
        let transport = ScriptedTransport::new()
            .send_ok()
            .send_timeout()
            .auth_ok()
            .send_timeout()
            .auth_ok()
            .send_timeout();
        let switch = Switch::stored(
            "tv",
            session(DeviceKind::Rm, transport),
            Some(code()),
            Some(code()),
        );

        switch.turn_on().await;
        switch.turn_off().await;

        assert!(switch.is_on());
    }
}

mod plug_switch {
    use super::*;

    #[tokio::test]
    async fn turn_on_drives_the_relay() {
        let transport = ScriptedTransport::new().set_power_ok();
        let calls = transport.calls();
        let switch = Switch::power("plug", session(DeviceKind::Sp1, transport));

        switch.turn_on().await;

        assert!(switch.is_on());
        assert_eq!(calls.set_power(), 1);
        assert_eq!(calls.send_packet(), 0);
    }

    #[tokio::test]
    async fn relay_timeouts_share_the_retry_policy() {
        let transport = ScriptedTransport::new()
            .set_power_timeout()
            .auth_ok()
            .set_power_timeout()
            .auth_ok()
            .set_power_timeout();
        let calls = transport.calls();
        let switch = Switch::power("plug", session(DeviceKind::Sp1, transport));

        switch.turn_on().await;

        assert!(!switch.is_on());
        assert_eq!(calls.set_power(), 3);
        assert_eq!(calls.authenticate(), 2);
    }
}

mod readback_switch {
    use super::*;

    #[tokio::test]
    async fn poll_overwrites_cached_state() {
        let transport = ScriptedTransport::new().set_power_ok().query_state(false);
        let switch = Switch::power_readback("plug", session(DeviceKind::Sp2, transport));

        switch.turn_on().await;
        assert!(switch.is_on());

        // The device disagrees with the assumed outcome.
        switch.update().await;
        assert!(!switch.is_on());
    }

    #[tokio::test]
    async fn indeterminate_polls_exhaust_budget_and_keep_state() {
        let transport = ScriptedTransport::new()
            .set_power_ok()
            .query_indeterminate()
            .query_indeterminate()
            .query_indeterminate();
        let calls = transport.calls();
        let switch = Switch::power_readback("plug", session(DeviceKind::Sp2, transport));

        switch.turn_on().await;
        switch.update().await;

        assert!(switch.is_on());
        // Two extra attempts beyond the first, no re-auth: the device
        // answered, it just had nothing definite to say.
        assert_eq!(calls.power_state(), 3);
        assert_eq!(calls.authenticate(), 0);
    }

    #[tokio::test]
    async fn poll_timeouts_behave_like_command_timeouts() {
        let transport = ScriptedTransport::new()
            .query_timeout()
            .auth_ok()
            .query_timeout()
            .auth_ok()
            .query_timeout();
        let calls = transport.calls();
        let switch = Switch::power_readback("plug", session(DeviceKind::Sp2, transport));

        switch.update().await;

        assert!(!switch.is_on());
        assert_eq!(calls.power_state(), 3);
        assert_eq!(calls.authenticate(), 2);
    }

    #[tokio::test]
    async fn mixed_indeterminate_and_timeout_share_one_budget() {
        let transport = ScriptedTransport::new()
            .query_indeterminate()
            .query_timeout()
            .auth_ok()
            .query_state(true);
        let calls = transport.calls();
        let switch = Switch::power_readback("plug", session(DeviceKind::Sp2, transport));

        switch.update().await;

        assert!(switch.is_on());
        assert_eq!(calls.power_state(), 3);
        assert_eq!(calls.authenticate(), 1);
    }
}
