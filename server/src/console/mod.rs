//! Interactive console for the network simulator.
//!
//! Reads integer commands from any async line source and writes plain
//! text to any async sink, so a whole session can be replayed from a
//! byte buffer.

#[macro_use]
pub mod macros;
pub mod input;
pub mod render;

use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::network::{Latency, LinkUpdate, Network, RandomSource};
use input::{Token, TokenReader};

/// Menu entries, keyed by the number the user types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Compute a route between two servers.
    FindRoute,
    /// Replace the latency of a link.
    UpdateLatency,
    /// Fail a link.
    SimulateFailure,
    /// Apply random latency spikes.
    SimulateCongestion,
    /// Show every link.
    DisplayTopology,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Maps a typed option number to a menu entry.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(MenuChoice::FindRoute),
            2 => Some(MenuChoice::UpdateLatency),
            3 => Some(MenuChoice::SimulateFailure),
            4 => Some(MenuChoice::SimulateCongestion),
            5 => Some(MenuChoice::DisplayTopology),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// What came back from a prompt.
enum Reply {
    Values(Vec<i64>),
    Invalid,
    Closed,
}

/// Console session over a reader/writer pair.
pub struct Console<R, W> {
    input: TokenReader<R>,
    output: W,
    alert_threshold: Latency,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a console. Routes at or above `alert_threshold` ms are
    /// flagged as high latency.
    pub fn new(reader: R, writer: W, alert_threshold: Latency) -> Self {
        Console {
            input: TokenReader::new(reader),
            output: writer,
            alert_threshold,
        }
    }

    /// Gives back the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// Prints `prompt` and reads `count` integers.
    async fn ask(&mut self, prompt: &str, count: usize) -> io::Result<Reply> {
        self.write(prompt).await?;

        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            match self.input.next_token().await? {
                Some(Token::Integer(value)) => values.push(value),
                Some(Token::Text(text)) => {
                    console_debug!("(ask) not a number: {}", text);
                    self.input.discard_pending();
                    return Ok(Reply::Invalid);
                }
                None => return Ok(Reply::Closed),
            }
        }

        Ok(Reply::Values(values))
    }

    /// Reads `count` integers whose first `nodes` values are node
    /// indices; a negative index makes the reply invalid.
    async fn ask_nodes(&mut self, prompt: &str, count: usize, nodes: usize) -> io::Result<Reply> {
        match self.ask(prompt, count).await? {
            Reply::Values(values) if values.iter().take(nodes).any(|value| *value < 0) => {
                Ok(Reply::Invalid)
            }
            reply => Ok(reply),
        }
    }

    /// Asks for the network mode and builds the network.
    ///
    /// Mode `1` loads the demo network with `demo_node_count` servers,
    /// mode `2` reads a custom network. Returns [`None`] if the setup was
    /// rejected or the input ended.
    pub async fn setup<G: RandomSource + ?Sized>(
        &mut self,
        demo_node_count: usize,
        rng: &mut G,
    ) -> io::Result<Option<Network>> {
        self.write("=====================================================\n")
            .await?;
        self.write("        NETWORK CONTROL CENTER\n      Dynamic Routing Simulation Engine\n")
            .await?;
        self.write("=====================================================\n\n")
            .await?;

        let prompt = format!(
            "Select Network Mode:\n1. Load Demo Network ({} Servers, Random Latency)\n2. Create Custom Network\nChoose option: ",
            demo_node_count
        );
        let mode = match self.ask(&prompt, 1).await? {
            Reply::Values(values) => values[0],
            Reply::Invalid => 0,
            Reply::Closed => return Ok(None),
        };

        match mode {
            1 => self.setup_demo(demo_node_count, rng).await,
            2 => self.setup_custom().await,
            _ => {
                console_warn!("(setup) invalid network mode {}.", mode);
                self.write("Invalid selection.\n").await?;
                Ok(None)
            }
        }
    }

    async fn setup_demo<G: RandomSource + ?Sized>(
        &mut self,
        demo_node_count: usize,
        rng: &mut G,
    ) -> io::Result<Option<Network>> {
        self.write("\n>> Generating Dynamic Latency Profile...\n")
            .await?;
        match Network::demo(demo_node_count, rng) {
            Ok(network) => {
                self.write("Demo Network Loaded Successfully.\n").await?;
                self.write(&render::render_topology(&network.list_links()))
                    .await?;
                Ok(Some(network))
            }
            Err(e) => {
                console_error!("(setup_demo) could not build demo network: {}", e);
                self.write(&format!("Could not load demo network: {}\n", e))
                    .await?;
                Ok(None)
            }
        }
    }

    async fn setup_custom(&mut self) -> io::Result<Option<Network>> {
        let node_count = match self.ask("Enter number of servers: ", 1).await? {
            Reply::Values(values) => values[0],
            Reply::Invalid => 0,
            Reply::Closed => return Ok(None),
        };
        let link_count = match self.ask("Enter number of network links: ", 1).await? {
            Reply::Values(values) => values[0],
            Reply::Invalid => -1,
            Reply::Closed => return Ok(None),
        };

        let (Ok(node_count), Ok(link_count)) =
            (usize::try_from(node_count), usize::try_from(link_count))
        else {
            self.write("Invalid input.\n").await?;
            return Ok(None);
        };
        if node_count == 0 {
            self.write("Invalid input.\n").await?;
            return Ok(None);
        }

        let mut network = Network::new(node_count);
        self.write("Enter links (u v latency_in_ms):\n").await?;
        for _ in 0..link_count {
            let values = match self.ask_nodes("", 3, 2).await? {
                Reply::Values(values) => values,
                Reply::Invalid => {
                    self.write("Invalid link.\n").await?;
                    return Ok(None);
                }
                Reply::Closed => return Ok(None),
            };

            if let Err(e) = network.add_link(values[0] as usize, values[1] as usize, values[2]) {
                console_warn!("(setup_custom) rejected link: {}", e);
                self.write(&format!("Invalid link: {}\n", e)).await?;
                return Ok(None);
            }
        }

        console_info!(
            "(setup_custom) custom network with {} servers and {} links.",
            node_count,
            link_count
        );
        Ok(Some(network))
    }

    /// Runs the menu loop until the user exits or the input ends.
    pub async fn run<G: RandomSource + ?Sized>(
        &mut self,
        network: &mut Network,
        rng: &mut G,
    ) -> io::Result<()> {
        loop {
            let choice = match self.ask(&format!("{}Choose option: ", render::MENU), 1).await? {
                Reply::Values(values) => MenuChoice::from_code(values[0]),
                Reply::Invalid => None,
                Reply::Closed => {
                    console_info!("(run) input closed.");
                    return Ok(());
                }
            };

            let Some(choice) = choice else {
                self.write("Invalid choice!\n").await?;
                continue;
            };
            console_debug!("(run) selected {:?}.", choice);

            let keep_going = match choice {
                MenuChoice::FindRoute => self.find_route(network).await?,
                MenuChoice::UpdateLatency => self.update_latency(network).await?,
                MenuChoice::SimulateFailure => self.simulate_failure(network).await?,
                MenuChoice::SimulateCongestion => {
                    let events = network.simulate_random_congestion(rng);
                    self.write(&render::render_congestion(&events)).await?;
                    true
                }
                MenuChoice::DisplayTopology => {
                    self.write(&render::render_topology(&network.list_links()))
                        .await?;
                    true
                }
                MenuChoice::Exit => {
                    self.write("Exiting Network System...\n").await?;
                    false
                }
            };

            if !keep_going {
                return Ok(());
            }
        }
    }

    async fn find_route(&mut self, network: &mut Network) -> io::Result<bool> {
        let nodes = match self
            .ask_nodes("Enter source and destination servers: ", 2, 2)
            .await?
        {
            Reply::Values(values) => values,
            Reply::Invalid => {
                self.write("Invalid server index!\n").await?;
                return Ok(true);
            }
            Reply::Closed => return Ok(false),
        };

        match network.compute_route(nodes[0] as usize, nodes[1] as usize) {
            Ok(report) => {
                let text = render::render_route(&report, self.alert_threshold);
                self.write(&text).await?;
            }
            Err(e) => self.write(&format!("{}\n", e)).await?,
        }
        Ok(true)
    }

    async fn update_latency(&mut self, network: &mut Network) -> io::Result<bool> {
        let values = match self
            .ask_nodes("Enter link (u v) and new latency (ms): ", 3, 2)
            .await?
        {
            Reply::Values(values) => values,
            Reply::Invalid => {
                self.write("Invalid input!\n").await?;
                return Ok(true);
            }
            Reply::Closed => return Ok(false),
        };

        match network.update_latency(values[0] as usize, values[1] as usize, values[2]) {
            Ok(outcome) => self.write(&format!("{}\n", outcome)).await?,
            Err(e) => self.write(&format!("{}\n", e)).await?,
        }
        Ok(true)
    }

    async fn simulate_failure(&mut self, network: &mut Network) -> io::Result<bool> {
        let values = match self
            .ask_nodes("Enter link (u v) to simulate failure: ", 2, 2)
            .await?
        {
            Reply::Values(values) => values,
            Reply::Invalid => {
                self.write("Invalid input!\n").await?;
                return Ok(true);
            }
            Reply::Closed => return Ok(false),
        };

        let (u, v) = (values[0] as usize, values[1] as usize);
        match network.simulate_failure(u, v) {
            Ok(LinkUpdate::Updated) => self.write(&render::render_failure(u, v)).await?,
            Ok(outcome) => self.write(&format!("{}\n", outcome)).await?,
            Err(e) => self.write(&format!("{}\n", e)).await?,
        }
        Ok(true)
    }
}
