/*!
 * Actuator speaking the rosbridge WebSocket protocol.
 *
 * The robot toolkit exposes its command surface as ROS topics behind a
 * rosbridge server (`ws://host:9090` by default). Commands are published as
 * rosbridge JSON ops:
 * - `/speech` (`robot_toolkit_msgs/speech_msg`) for TTS
 * - `/animations` (`robot_toolkit_msgs/animation_msg`) for gestures
 * - `/tablet_say` (`std_msgs/String`) for subtitles
 * - `/pytoolkit/ALTabletService/show_web_view_srv` (service) for the tablet
 *
 * Publishing is fire-and-forget: a successful send only means the frame
 * left this process. The engine never waits for robot-side acknowledgment.
 */

use futures_util::SinkExt;
use futures_util::stream::{SplitSink, StreamExt};
use log::{debug, info};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use uuid::Uuid;

use crate::actuators::Actuator;
use crate::app_config::RosConfig;
use crate::errors::ActuatorError;

/// Topic carrying TTS commands
pub const SPEECH_TOPIC: &str = "/speech";
/// Topic carrying animation commands
pub const ANIMATION_TOPIC: &str = "/animations";
/// Topic carrying subtitle text for the tablet
pub const SUBTITLE_TOPIC: &str = "/tablet_say";
/// Service showing a web view on the tablet
pub const TABLET_WEB_VIEW_SERVICE: &str = "/pytoolkit/ALTabletService/show_web_view_srv";

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Build the rosbridge frame advertising a topic
fn advertise_payload(topic: &str, msg_type: &str) -> Value {
    json!({ "op": "advertise", "topic": topic, "type": msg_type })
}

/// Build the rosbridge frame publishing one message
fn publish_payload(topic: &str, msg: Value) -> Value {
    json!({ "op": "publish", "topic": topic, "msg": msg })
}

/// Build the rosbridge frame calling a service
fn call_service_payload(service: &str, id: &str, args: Value) -> Value {
    json!({ "op": "call_service", "service": service, "id": id, "args": args })
}

/// Wire shape of a `robot_toolkit_msgs/speech_msg`
pub fn speech_msg(language: &str, text: &str, animated: bool) -> Value {
    json!({ "language": language, "text": text, "animated": animated })
}

/// Wire shape of a `robot_toolkit_msgs/animation_msg`
pub fn animation_msg(path: &str) -> Value {
    json!({ "family": "animations", "animation_name": path })
}

/// Wire shape of a `std_msgs/String`
pub fn string_msg(data: &str) -> Value {
    json!({ "data": data })
}

/// Actuator publishing commands through a rosbridge server.
///
/// Holds the write half of the WebSocket; the read half is dropped after
/// the handshake since nothing in the command surface requires inbound
/// frames.
#[derive(Debug)]
pub struct RosBridgeActuator {
    endpoint: String,
    sink: Mutex<Option<WsSink>>,
}

impl RosBridgeActuator {
    /// Connect to the rosbridge server and advertise the command topics
    pub async fn connect(config: &RosConfig) -> Result<Self, ActuatorError> {
        let connect = connect_async(config.endpoint.as_str());
        let (ws_stream, _response) =
            tokio::time::timeout(Duration::from_secs(config.connect_timeout_secs), connect)
                .await
                .map_err(|_| {
                    ActuatorError::ConnectionError(format!(
                        "Timed out connecting to rosbridge at {}",
                        config.endpoint
                    ))
                })?
                .map_err(|e| {
                    ActuatorError::ConnectionError(format!(
                        "Failed to connect to rosbridge at {}: {}",
                        config.endpoint, e
                    ))
                })?;

        info!("Connected to rosbridge at {}", config.endpoint);

        let (sink, _read) = ws_stream.split();
        let actuator = Self {
            endpoint: config.endpoint.clone(),
            sink: Mutex::new(Some(sink)),
        };

        for (topic, msg_type) in [
            (SPEECH_TOPIC, "robot_toolkit_msgs/speech_msg"),
            (ANIMATION_TOPIC, "robot_toolkit_msgs/animation_msg"),
            (SUBTITLE_TOPIC, "std_msgs/String"),
        ] {
            actuator.send(advertise_payload(topic, msg_type)).await?;
        }

        Ok(actuator)
    }

    /// Endpoint this actuator is connected to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one rosbridge frame over the socket
    async fn send(&self, payload: Value) -> Result<(), ActuatorError> {
        let frame = serde_json::to_string(&payload)
            .map_err(|e| ActuatorError::EncodeError(e.to_string()))?;

        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(ActuatorError::NotConnected)?;

        debug!("rosbridge -> {}", frame);
        sink.send(Message::Text(frame))
            .await
            .map_err(|e| ActuatorError::SendFailed(e.to_string()))
    }

    /// Publish one message on a topic
    async fn publish(&self, topic: &str, msg: Value) -> Result<(), ActuatorError> {
        self.send(publish_payload(topic, msg)).await
    }
}

#[async_trait::async_trait]
impl Actuator for RosBridgeActuator {
    async fn speak(&self, language: &str, text: &str, animated: bool) -> Result<(), ActuatorError> {
        self.publish(SPEECH_TOPIC, speech_msg(language, text, animated))
            .await
    }

    async fn play_animation(&self, path: &str) -> Result<(), ActuatorError> {
        self.publish(ANIMATION_TOPIC, animation_msg(path)).await
    }

    async fn set_display_content(&self, content: &str) -> Result<(), ActuatorError> {
        let call_id = format!("show_web_view:{}", Uuid::new_v4());
        self.send(call_service_payload(
            TABLET_WEB_VIEW_SERVICE,
            &call_id,
            json!({ "url": content }),
        ))
        .await
    }

    async fn set_subtitle_text(&self, text: &str) -> Result<(), ActuatorError> {
        self.publish(SUBTITLE_TOPIC, string_msg(text)).await
    }

    async fn test_connection(&self) -> Result<(), ActuatorError> {
        // rosbridge has no application-level ping; a WebSocket ping frame
        // at least proves the socket is still writable.
        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(ActuatorError::NotConnected)?;
        sink.send(Message::Ping(Vec::new()))
            .await
            .map_err(|e| ActuatorError::SendFailed(e.to_string()))
    }
}
