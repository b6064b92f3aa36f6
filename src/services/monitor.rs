//! Signal monitor.
//!
//! The only long-lived CapyBlocks process. Subscribes to connman state
//! changes and UPower display device changes on the system bus and asks the
//! bar to re-run the matching block with a real-time signal.
//! No reconnect: losing the bus ends the process.

use crate::config::Config;
use crate::error::BlockError;
use crate::event_bus::{
    BusSignal, CONNMAN_MANAGER_INTERFACE, CONNMAN_MANAGER_PATH, CONNMAN_SERVICE,
    PROPERTIES_CHANGED, PROPERTIES_INTERFACE, PROPERTY_CHANGED, RedrawTarget,
    SIGNAL_QUEUE_CAPACITY, STATE_PROPERTY,
};
use crate::services::battery::DISPLAY_DEVICE_PATH;
use futures_util::stream::StreamExt;
use log::{debug, error, info, warn};
use std::process::Command;
use zbus::{Connection, MatchRule, Message, MessageStream};

const PKILL_BIN: &str = "pkill";

/// Run the monitor until the bus connection is lost.
pub fn run(config: &Config) -> Result<(), BlockError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(listen(&config.bar_process))
}

/// connman manager `PropertyChanged` with `State` as first argument.
pub fn network_rule() -> zbus::Result<MatchRule<'static>> {
    Ok(MatchRule::builder()
        .msg_type(zbus::message::Type::Signal)
        .sender(CONNMAN_SERVICE)?
        .path(CONNMAN_MANAGER_PATH)?
        .interface(CONNMAN_MANAGER_INTERFACE)?
        .member(PROPERTY_CHANGED)?
        .arg(0, STATE_PROPERTY)?
        .build())
}

/// `PropertiesChanged` on the UPower display device.
pub fn power_rule() -> zbus::Result<MatchRule<'static>> {
    Ok(MatchRule::builder()
        .msg_type(zbus::message::Type::Signal)
        .path(DISPLAY_DEVICE_PATH)?
        .interface(PROPERTIES_INTERFACE)?
        .member(PROPERTIES_CHANGED)?
        .build())
}

async fn listen(bar_process: &str) -> Result<(), BlockError> {
    let connection = Connection::system().await?;

    let mut network_stream =
        MessageStream::for_match_rule(network_rule()?, &connection, Some(SIGNAL_QUEUE_CAPACITY))
            .await?;
    let mut power_stream =
        MessageStream::for_match_rule(power_rule()?, &connection, Some(SIGNAL_QUEUE_CAPACITY))
            .await?;

    info!("Listening for network and power D-Bus signals...");

    loop {
        let msg = tokio::select! {
            Some(msg) = network_stream.next() => msg,
            Some(msg) = power_stream.next() => msg,
            else => {
                error!("Signal streams ended");
                return Err(BlockError::ConnectionLost);
            }
        };

        dispatch(&msg?, bar_process);
    }
}

/// Classify one signal and trigger its redraw, if any.
fn dispatch(msg: &Message, bar_process: &str) {
    let header = msg.header();
    let (Some(interface), Some(member)) = (header.interface(), header.member()) else {
        return;
    };
    let path = header.path().map(|p| p.as_str()).unwrap_or_default();

    let Some(signal) = BusSignal::classify(interface.as_str(), member.as_str(), path) else {
        debug!("Ignoring {}.{} on {}", interface, member, path);
        return;
    };

    let target = signal.redraw_target();
    debug!("{:?} -> redraw {:?}", signal, target);

    if let Err(e) = redraw(target, bar_process) {
        warn!("Redraw of {:?} failed: {}", target, e);
    }
}

/// Send `SIGRTMIN+N` to the bar so it re-runs the target block.
pub fn redraw(target: RedrawTarget, bar_process: &str) -> Result<(), BlockError> {
    let status = Command::new(PKILL_BIN)
        .args(pkill_args(target, bar_process))
        .status()
        .map_err(|source| BlockError::Spawn {
            program: PKILL_BIN.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(BlockError::Exit {
            program: PKILL_BIN.to_string(),
            status,
        });
    }

    Ok(())
}

fn pkill_args(target: RedrawTarget, bar_process: &str) -> [String; 2] {
    [
        format!("-RTMIN+{}", target.signal_number()),
        bar_process.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkill_args() {
        assert_eq!(
            pkill_args(RedrawTarget::Battery, "i3blocks"),
            ["-RTMIN+3".to_string(), "i3blocks".to_string()]
        );
        assert_eq!(
            pkill_args(RedrawTarget::Wifi, "i3blocks")[0],
            "-RTMIN+1"
        );
    }

    #[test]
    fn test_network_rule() {
        let rule = network_rule().unwrap().to_string();
        assert!(rule.contains("type='signal'"));
        assert!(rule.contains("sender='net.connman'"));
        assert!(rule.contains("path='/'"));
        assert!(rule.contains("interface='net.connman.Manager'"));
        assert!(rule.contains("member='PropertyChanged'"));
        assert!(rule.contains("arg0='State'"));
    }

    #[test]
    fn test_power_rule() {
        let rule = power_rule().unwrap().to_string();
        assert!(rule.contains("path='/org/freedesktop/UPower/devices/DisplayDevice'"));
        assert!(rule.contains("interface='org.freedesktop.DBus.Properties'"));
        assert!(rule.contains("member='PropertiesChanged'"));
        assert!(!rule.contains("sender="));
    }

    #[test]
    fn test_power_signal_dispatches_battery_redraw() {
        let msg = Message::signal(
            DISPLAY_DEVICE_PATH,
            PROPERTIES_INTERFACE,
            PROPERTIES_CHANGED,
        )
        .unwrap()
        .build(&())
        .unwrap();
        let header = msg.header();

        let signal = BusSignal::classify(
            header.interface().unwrap().as_str(),
            header.member().unwrap().as_str(),
            header.path().unwrap().as_str(),
        );
        assert_eq!(signal.map(|s| s.redraw_target()), Some(RedrawTarget::Battery));
    }
}
