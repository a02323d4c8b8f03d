//! Markup templates for the panel shell and channel rows.

use deck_bridge::{MenuAction, Threshold};
use deck_dom::{Node, id};

pub const MENU_ID: &str = "menu";
pub const CHANNELS_ID: &str = "channels";
pub const ALERTS_ID: &str = "alerts";
pub const ERRORS_ID: &str = "errors";

const CHANNEL_SCOPE: &str = "channel";

/// Element ids derived from a channel name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelIds {
    pub row: String,
    pub head: String,
    pub selector: String,
    pub slider: String,
    pub skip: String,
    pub play_pause: String,
}

impl ChannelIds {
    pub fn new(name: &str) -> Self {
        let row = id::scoped(CHANNEL_SCOPE, name);
        Self {
            head: id::part(&row, "head"),
            selector: id::part(&row, "selector"),
            slider: id::part(&row, "slider"),
            skip: id::part(&row, "skip"),
            play_pause: id::part(&row, "play_pause"),
            row,
        }
    }
}

pub fn menu_button_id(action: MenuAction) -> String {
    id::part(MENU_ID, action.as_str())
}

/// Top level containers, in document order.
pub fn shell() -> Vec<Node> {
    let menu = MenuAction::ALL.iter().fold(
        Node::new("div").id(MENU_ID).class("w3-bar w3-dark-grey w3-small"),
        |bar, action| {
            bar.child(
                Node::new("div")
                    .id(menu_button_id(*action))
                    .class("w3-bar-item w3-button")
                    .html(action.label()),
            )
        },
    );

    vec![
        menu,
        Node::new("div").id(CHANNELS_ID).class("w3-container"),
        Node::new("div").id(ERRORS_ID).class("w3-bottom"),
        Node::new("div").id(ALERTS_ID).class("w3-bottom"),
    ]
}

fn threshold_options() -> String {
    Threshold::DESCENDING
        .iter()
        .map(|t| format!("<option value='{}'>{}</option>", t.level(), t.label()))
        .collect()
}

/// One control group: name and threshold overlay, volume slider, and the
/// skip / play-pause buttons.
pub fn channel_row(name: &str, volume: u8, threshold: Threshold) -> Node {
    let ids = ChannelIds::new(name);

    let head = Node::new("div")
        .id(ids.head)
        .class("w3-cell w3-cell-middle w3-center w3-padding-small overlay-container")
        .style("width:10%;min-width:90px")
        .child(
            Node::new("div")
                .class("overlay-content w3-container w3-padding-small w3-animate-opacity w3-grey w3-center")
                .html("<span>Threshold</span><br>")
                .child(
                    Node::new("select")
                        .id(ids.selector)
                        .attr("value", threshold.level().to_string())
                        .html(threshold_options()),
                ),
        )
        .child(Node::new("h4").html(name.to_string()));

    let slider = Node::new("div")
        .class("w3-cell w3-cell-middle w3-rest w3-container w3-padding-small")
        .child(
            Node::new("input")
                .id(ids.slider)
                .attr("type", "range")
                .attr("min", "0")
                .attr("max", "100")
                .attr("value", volume.to_string()),
        );

    let buttons = Node::new("div")
        .class("w3-cell w3-cell-middle w3-center w3-small w3-padding-small")
        .style("width:2%;min-width:10px;")
        .child(
            Node::new("div")
                .id(ids.skip)
                .class("w3-button w3-block w3-round w3-small w3-padding-small")
                .attr("title", format!("Skip {}", name))
                .html("&#x23ED;"),
        )
        .child(
            Node::new("div")
                .id(ids.play_pause)
                .class("w3-button w3-block w3-round w3-small w3-padding-small")
                .attr("title", format!("Play/Pause {}", name))
                .html("&#x23EF;"),
        );

    Node::new("div")
        .id(ids.row)
        .class("w3-cell-row w3-border-bottom")
        .child(head)
        .child(slider)
        .child(buttons)
}
