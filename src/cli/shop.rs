//! Interactive shop: browse, fill a cart, check out and talk to the
//! assistant from one prompt.
use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Error, Result, anyhow, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::ai::chat::{AssistantSession, ChatTurn, Rejection, Submission, TurnRole};
use crate::cart::{Cart, CartEvent, WeightTier};
use crate::catalog::{Catalog, CategoryFilter, Product};
use crate::checkout::{self, chat_link, phone_link, social_link};
use crate::core::AppConfig;

const HELP: &str = r"Commands:
  list [category]        Show products, optionally for one category
  search <text>          Find products by name
  add <id> <weight>      Add a pack (weight: 250g, 500g or 1kg)
  inc <id> <weight>      One more of a cart line
  dec <id> <weight>      One less of a cart line (never below 1)
  remove <id> <weight>   Drop a cart line
  cart                   Show the cart
  checkout               Print the order message and the link to send it
  ask <question>         Ask the assistant for a recommendation
  chat                   Show the conversation with the assistant
  contact                Show contact details
  help                   Show this message
  quit                   Leave the shop";

#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    List(CategoryFilter),
    Search(String),
    Add(String, WeightTier),
    Increment(String, WeightTier),
    Decrement(String, WeightTier),
    Remove(String, WeightTier),
    Cart,
    Checkout,
    Ask(String),
    Chat,
    Contact,
    Help,
    Quit,
}

fn line_key<'a>(mut args: impl Iterator<Item = &'a str>, cmd: &str) -> Result<(String, WeightTier)> {
    let id = args
        .next()
        .ok_or(anyhow!("Usage: {} <id> <weight>", cmd))?;
    let tier = args
        .next()
        .ok_or(anyhow!("Usage: {} <id> <weight>", cmd))?
        .parse::<WeightTier>()?;
    Ok((id.to_string(), tier))
}

impl FromStr for ShellCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (cmd, raw_rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let cmd = cmd.trim_end();
        let rest = raw_rest.trim();
        let args = rest.split_whitespace();

        let command = match cmd.to_lowercase().as_str() {
            "list" | "ls" => {
                if rest.is_empty() {
                    ShellCommand::List(CategoryFilter::All)
                } else {
                    ShellCommand::List(rest.parse()?)
                }
            }
            "search" => ShellCommand::Search(rest.to_string()),
            "add" => {
                let (id, tier) = line_key(args, "add")?;
                ShellCommand::Add(id, tier)
            }
            "inc" => {
                let (id, tier) = line_key(args, "inc")?;
                ShellCommand::Increment(id, tier)
            }
            "dec" => {
                let (id, tier) = line_key(args, "dec")?;
                ShellCommand::Decrement(id, tier)
            }
            "remove" | "rm" => {
                let (id, tier) = line_key(args, "remove")?;
                ShellCommand::Remove(id, tier)
            }
            "cart" => ShellCommand::Cart,
            "checkout" => ShellCommand::Checkout,
            // Everything after the separating space, as typed
            "ask" => ShellCommand::Ask(raw_rest.to_string()),
            "chat" => ShellCommand::Chat,
            "contact" => ShellCommand::Contact,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            "" => bail!("Type `help` to see the commands"),
            other => bail!("Unknown command: {}. Type `help` to see the commands", other),
        };
        Ok(command)
    }
}

pub fn render_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut out = String::new();
    for p in products {
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:<16} 250g ₹{:<5} 500g ₹{:<5} 1kg ₹{}",
            p.id,
            p.name,
            p.category.label(),
            WeightTier::Small.price_for(p.price),
            WeightTier::Medium.price_for(p.price),
            WeightTier::Large.price_for(p.price),
        );
    }
    if out.is_empty() {
        out.push_str("No products found\n");
    }
    out
}

pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }
    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:<5} x{:<3} ₹{}",
            line.product_id,
            line.name,
            line.tier.label(),
            line.quantity,
            line.subtotal()
        );
    }
    let _ = writeln!(out, "{} items, total ₹{}", cart.item_count(), cart.total());
    out
}

pub fn render_turn(turn: &ChatTurn) -> String {
    let who = match turn.role {
        TurnRole::User => "you",
        TurnRole::Assistant => "assistant",
    };
    format!("[{}] {}\n", who, turn.text)
}

pub struct Shop {
    config: AppConfig,
    catalog: Catalog,
    cart: Cart,
    cart_events: mpsc::UnboundedReceiver<CartEvent>,
    assistant: AssistantSession,
    // Number of transcript turns already shown
    seen_turns: usize,
}

impl Shop {
    pub fn new(config: AppConfig, catalog: Catalog, assistant: AssistantSession) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            catalog,
            cart: Cart::with_events(tx),
            cart_events: rx,
            seen_turns: assistant.transcript().len(),
            assistant,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn assistant(&self) -> &AssistantSession {
        &self.assistant
    }

    /// Run one command and return what should be printed
    pub fn execute(&mut self, command: ShellCommand) -> Result<String> {
        let out = match command {
            ShellCommand::List(filter) => render_products(self.catalog.filter(filter, "")),
            ShellCommand::Search(text) => {
                render_products(self.catalog.filter(CategoryFilter::All, &text))
            }
            ShellCommand::Add(id, tier) => {
                let product = self
                    .catalog
                    .get(&id)
                    .ok_or(anyhow!("No product with id {}", id))?;
                let line = self.cart.add(product, tier);
                format!(
                    "Added {} ({}), you have {}\n",
                    line.name,
                    tier.label(),
                    line.quantity
                )
            }
            ShellCommand::Increment(id, tier) => {
                self.cart.update_quantity(&id, tier, 1);
                render_cart(&self.cart)
            }
            ShellCommand::Decrement(id, tier) => {
                self.cart.update_quantity(&id, tier, -1);
                render_cart(&self.cart)
            }
            ShellCommand::Remove(id, tier) => {
                self.cart.remove(&id, tier);
                render_cart(&self.cart)
            }
            ShellCommand::Cart => render_cart(&self.cart),
            ShellCommand::Checkout => {
                if self.cart.is_empty() {
                    "Your cart is empty\n".to_string()
                } else {
                    let (summary, link) = checkout::checkout(&self.cart, &self.config.contact_phone);
                    format!("{}\n\nOpen this link to send your order:\n{}\n", summary, link)
                }
            }
            ShellCommand::Ask(text) => {
                // Flush first so the only unseen turn after an
                // accepted submit is the one we just added
                let mut out = self.pending_output();
                match self.assistant.submit(&text) {
                    Submission::Accepted(_) => {
                        // The reply shows up on a later prompt
                        self.seen_turns += 1;
                        out.push_str("The assistant is thinking...\n");
                    }
                    Submission::Rejected(Rejection::RequestInFlight) => {
                        out.push_str("The assistant is still answering your last question\n");
                    }
                    Submission::Rejected(Rejection::EmptyInput) => {}
                }
                out
            }
            ShellCommand::Chat => {
                let transcript = self.assistant.transcript();
                self.seen_turns = transcript.len();
                transcript.iter().map(render_turn).collect()
            }
            ShellCommand::Contact => format!(
                "Phone: {} ({})\nWhatsApp: {}\nInstagram: {} ({})\n",
                self.config.contact_phone,
                phone_link(&self.config.contact_phone),
                chat_link(&self.config.contact_phone),
                self.config.social_handle,
                social_link(&self.config.social_handle),
            ),
            ShellCommand::Help => format!("{}\n", HELP),
            ShellCommand::Quit => String::new(),
        };
        Ok(out)
    }

    /// Anything that happened outside of the last command: the cart
    /// asking to be shown and assistant replies that arrived.
    pub fn pending_output(&mut self) -> String {
        let mut out = String::new();

        let mut presented = false;
        while let Ok(CartEvent::Presented) = self.cart_events.try_recv() {
            presented = true;
        }
        if presented {
            out.push_str(&render_cart(&self.cart));
        }

        let transcript = self.assistant.transcript();
        for turn in transcript.iter().skip(self.seen_turns) {
            out.push_str(&render_turn(turn));
        }
        self.seen_turns = transcript.len();

        out
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let assistant = AssistantSession::from_config(&config)?;
    tracing::info!(
        "Shop open with {} products, assistant session {}",
        catalog.len(),
        assistant.id()
    );

    println!("Welcome to Teja Pickles & Home Foods!\n");
    println!("{}", render_products(catalog.featured()));
    let mut shop = Shop::new(config, catalog, assistant);
    for turn in shop.assistant().transcript() {
        print!("{}", render_turn(&turn));
    }
    println!("Type `help` to see what you can do.");

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline("shop> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    print!("{}", shop.pending_output());
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match line.parse::<ShellCommand>() {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => match shop.execute(command) {
                        Ok(out) => print!("{}", out),
                        Err(e) => println!("{}", e),
                    },
                    Err(e) => println!("{}", e),
                }
                print!("{}", shop.pending_output());
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
