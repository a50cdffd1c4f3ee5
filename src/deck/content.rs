//! The eleven slides of the deck as static data.

use crate::constants::SLIDE_COUNT;

pub struct Card {
    pub title: &'static str,
    pub highlight: Option<&'static str>,
    pub lines: &'static [&'static str],
}

pub struct SlideContent {
    pub title: &'static str,
    pub kicker: Option<&'static str>,
    pub lead: Option<&'static str>,
    /// Texture key drawn above the title.
    pub image: Option<&'static str>,
    pub chips: &'static [&'static str],
    pub cards: &'static [Card],
    pub footer: Option<&'static str>,
}

const fn card(title: &'static str, highlight: Option<&'static str>, lines: &'static [&'static str]) -> Card {
    Card { title, highlight, lines }
}

pub static SLIDES: [SlideContent; SLIDE_COUNT] = [
    SlideContent {
        title: "Owners Network",
        kicker: None,
        lead: Some("A 100% trustless DEX with usability of a CEX"),
        image: Some("logo"),
        chips: &["Trustless", "On-chain", "Bridgeless"],
        cards: &[],
        footer: None,
    },
    SlideContent {
        title: "The Problem",
        kicker: Some("Unacceptable Trade-Off"),
        lead: Some("Traders are forced to choose between CEX Risks and DEX Limitations"),
        image: None,
        chips: &[],
        cards: &[
            card("Custodial Risks", Some("~$50B lost"), &["Fraud, hacks, frozen and/or confiscated user assets, government regulation, bankruptcy"]),
            card("Private Key Loss", Some("~20% BTC unrecoverable"), &["Users lack tech-skills to secure keys, many avoid self-custody in favor of CEXs and ETFs"]),
            card("No Crypto Inheritance", Some("Zero solutions"), &["Family wealth is trapped in wallets and cannot be passed on without big hassle and huge security risk"]),
            card("Bridge & Wrapped Token Risks", Some("~$3B stolen"), &["Bridges are notoriously exploitable, wrapped assets are managed by 3rd party custodians"]),
            card("Bad UX & Performance", Some("Slow & clunky"), &["Sluggish order matching, AMMs lag behind market action, onramp is often a barrier"]),
            card("No User Privacy on CEXs", Some("KYC a must"), &["No anonymity and privacy, denial of service to certain citizens and geographies"]),
        ],
        footer: None,
    },
    SlideContent {
        title: "The Solution",
        kicker: Some("Bridgeless & Seamless"),
        lead: Some("100% trustless, bridgeless real-asset trading with CEX-grade speed"),
        image: None,
        chips: &[],
        cards: &[
            card("Native Asset Trading", None, &["Real BTC, ETH, XMR - no bridges, no wrapped coins"]),
            card("CEX-like UX", None, &["On-chain order-book and instant order matching, built-in wallet for seamless on-ramp"]),
            card("Instant Execution", None, &["Sub-one-second finality, reverse-gas model for zero-gas trading"]),
            card("Innovative Self-Custody", None, &["Key recovery via iris scan, password, and sketch"]),
            card("Trustless Crypto Inheritance", None, &["Trivial policy setup and claim, all on-chain, without 3rd party involvement"]),
            card("Unique Edge", None, &["100% trustless, bridgeless real-asset trading with CEX-grade speed"]),
        ],
        footer: None,
    },
    SlideContent {
        title: "Product & Technology",
        kicker: Some("Product Offering (MVP)"),
        lead: None,
        image: None,
        chips: &[],
        cards: &[
            card("Native Spot Trading", None, &["BTC, ETH, SOL, XMR", "Top 10 assets by market-cap"]),
            card("Unified Self-Custody Wallet", None, &["Private-key recovery", "Asset inheritance", "Multi-chain support"]),
            card(
                "Architecture Highlights",
                None,
                &[
                    "~1s transaction finality on Vara.eth roll-up and Ethereum",
                    "On-chain orderbook engine, sub-second matching",
                    "Hybrid L2/L1 scalability, 200K+ orders/sec",
                    "Chain-signatures for bridgeless cross-chain assets",
                    "Reverse-gas model for zero-gas trading",
                ],
            ),
        ],
        footer: None,
    },
    SlideContent {
        title: "Market Opportunity",
        kicker: None,
        lead: None,
        image: None,
        chips: &[],
        cards: &[
            card("$898B", Some("Decentralized Perpetuals Volume"), &["Q2 2025"]),
            card("14M+", Some("DeFi User Base"), &["Growing exponentially"]),
            card("5%", Some("Target Market Share"), &["On-Chain Derivatives by 2028"]),
            card("Our Target Goals", None, &["Top-10 DEX position within 2-3 years", "5% of on-chain derivatives by 2028"]),
            card(
                "User Migration Potential",
                None,
                &[
                    "CEX users ready to migrate to better platforms",
                    "Growing demand for trustless, non-custodial solutions",
                    "Need for private key recovery and asset inheritance",
                ],
            ),
        ],
        footer: None,
    },
    SlideContent {
        title: "Competitor Analysis",
        kicker: None,
        lead: None,
        image: None,
        chips: &["100% trustless", "Bridgeless trading", "CEX-grade speed", "Key recovery", "Asset inheritance", "Unified wallet"],
        cards: &[
            card("Binance (CEX)", None, &["+ Liquidity", "+ Performance", "- 3rd party custodian risks", "- Not anonymous or private", "- Heavily regulated"]),
            card("Hyperliquid (Hybrid DEX)", None, &["+ 200K orders/sec", "+ ~$110M monthly revenue", "- Not trustless", "- Limited decentralization"]),
            card("Uniswap (OG DEX)", None, &["+ Fully decentralized", "+ Large volume", "- Wrapped tokens", "- Lagging AMM prices", "- Poor UX"]),
        ],
        footer: Some("Our Edge"),
    },
    SlideContent {
        title: "Business Model & Projections",
        kicker: Some("Revenue Model"),
        lead: None,
        image: None,
        chips: &[],
        cards: &[
            card("Transaction Fee", Some("0.05% taker / 0.01% maker"), &[]),
            card("Hyperliquid Benchmark", None, &["Daily volume: $1B", "Daily revenue: $500K", "Monthly revenue: $110M"]),
            card("Revenue Projections", Some("$50M"), &["Annual revenue by Year 3"]),
            card("Profitability", None, &["Low costs on Vara.eth mean more freedom for campaigns and customer acquisition"]),
        ],
        footer: None,
    },
    SlideContent {
        title: "Development Roadmap",
        kicker: Some("8 Month Execution Plan"),
        lead: None,
        image: None,
        chips: &["Engineering & Security 60%", "Marketing & Community 30%", "Legal & Ops 5%", "Infrastructure 5%"],
        cards: &[
            card("Foundation Phase", Some("Months 1-2"), &["Graphical design", "Dev-net setup", "Native assets layer"]),
            card("Wallet Development", Some("Months 3-4"), &["Inheritance", "Wallet integration", "TradingView integration"]),
            card("Trading & Launch Prep", Some("Months 4-5"), &["Key backup/recovery", "Spot trading", "Test-net launch"]),
            card("Governance & Mainnet", Some("Months 6-8"), &["DAO structure", "Main-net launch", "Security audits"]),
        ],
        footer: Some("Funding Ask: $600,000 - 8-month runway"),
    },
    SlideContent {
        title: "Long-Term Product Evolution",
        kicker: None,
        lead: Some("Building the future of trustless trading"),
        image: None,
        chips: &[],
        cards: &[
            card("Version 2", None, &["Perpetual futures", "Mobile applications", "Web applications"]),
            card("Version 3", None, &["CEX-user campaign", "Options trading", "User bots"]),
            card("Version 4 (2027)", None, &["DaaS (DEX as a Service)", "White-label solution", "Liquidity sharing"]),
        ],
        footer: None,
    },
    SlideContent {
        title: "Team & Advisers",
        kicker: None,
        lead: None,
        image: None,
        chips: &[],
        cards: &[
            card("Vadim Dvoskin", Some("Founder"), &["IT entrepreneur with 10+ years in software, product and project management. Built DEXs, wallets and smart contracts."]),
            card("Pavel Salas", Some("CBDO"), &["15+ years across Fintech, Web3 and regulated finance. Former CGO of an L1 protocol and eToro executive."]),
            card("Ivan Vakulenchik", Some("CTO"), &["Senior blockchain developer, 10+ years building smart contracts, wallets, DEX and DeFi protocols. HFT expert."]),
            card("Alexandra Pollack", Some("CMO"), &["Marketing leader driving strategy at McDonald's Corporation, previously at Deloitte. Columbia University graduate."]),
            card("Nick Volf", Some("Adviser"), &["Founder of Vara Network, former lead developer at Parity Technologies. Substrate infrastructure expert."]),
        ],
        footer: None,
    },
    SlideContent {
        title: "Join the Revolution",
        kicker: None,
        lead: Some("Be part of the future of decentralized trading"),
        image: None,
        chips: &[],
        cards: &[
            card("Trustless Infrastructure", None, &["Forefront of decentralized trading technology"]),
            card("Strategic Partnership", None, &["Collaborate with industry leaders in DeFi"]),
            card("Growth Opportunity", None, &["Access $898B volume market"]),
        ],
        footer: Some("Ready to build the future? Contact us to discuss partnership opportunities"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slide_has_a_title() {
        assert_eq!(SLIDES.len(), SLIDE_COUNT);
        assert!(SLIDES.iter().all(|s| !s.title.is_empty()));
    }
}
