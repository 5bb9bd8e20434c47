//! Deterministic collectible artwork.
//!
//! The SVG is derived entirely from ticket fields, so the visual can always
//! be regenerated from on-chain-recoverable data instead of being stored.
//! Identical fields produce byte-identical output; no I/O, no randomness.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::state::EventTicket;

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// 32-bit rolling hash over the string, kept in wrapping i32 arithmetic so
/// the palette is stable across platforms.
fn hash_string(s: &str) -> u32 {
    let mut h: i32 = 0;
    for c in s.chars() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32);
    }
    h.unsigned_abs()
}

fn seed_from_ticket(ticket: &EventTicket) -> u32 {
    hash_string(&format!("{}{}{}", ticket.artist, ticket.venue, ticket.date))
}

/// `YYYY-MM-DD` to a short human date; falls back to the raw string for
/// anything it cannot parse, since reconstructed tickets may carry junk.
fn format_date(date: &str) -> String {
    let mut parts = date.split('-');
    let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return date.to_string(),
    };
    let month_idx = match month.parse::<usize>() {
        Ok(m) if (1..=12).contains(&m) => m - 1,
        _ => return date.to_string(),
    };
    let day_num = day.parse::<u32>().unwrap_or(0);
    format!("{} {} {}", day_num, MONTHS[month_idx], year)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Renders the collectible artwork for a ticket.
pub fn generate_artwork(ticket: &EventTicket) -> String {
    let seed = seed_from_ticket(ticket);
    let hue = seed % 360;
    let hue2 = (hue + 180 + seed % 60) % 360;
    let sat = 55 + seed % 25;
    let light1 = 12 + seed % 8;
    let light2 = 28 + seed % 12;

    let gradient_id = format!("g-{seed}");
    let wave_id = format!("w-{seed}");

    let particles: String = (0..12u32)
        .map(|i| {
            let x = 20 + seed.wrapping_mul(i + 1) % 360;
            let y = 30 + seed.wrapping_mul(i + 3) % 340;
            let r = 2 + seed % 3;
            let opacity = 0.15 + (seed % 10) as f64 / 100.0;
            format!(r#"<circle cx="{x}" cy="{y}" r="{r}" fill="white" opacity="{opacity}"/>"#)
        })
        .collect::<Vec<_>>()
        .join("\n  ");

    let wave_points = (0..8u32)
        .map(|i| {
            let x = f64::from(i) / 7.0 * 400.0;
            let y = 200.0
                + ((f64::from(seed) + f64::from(i) * 0.5) * 0.3).sin() * 40.0
                + f64::from(i % 2) * 20.0;
            format!("{x},{y}")
        })
        .collect::<Vec<_>>()
        .join(" ");

    let raw_artist = &ticket.artist;
    let (artist_line1, artist_line2) = if raw_artist.chars().count() > 18 {
        let split = raw_artist
            .char_indices()
            .nth(18)
            .map(|(i, _)| i)
            .unwrap_or(raw_artist.len());
        (
            escape_xml(&raw_artist[..split]),
            Some(escape_xml(&raw_artist[split..])),
        )
    } else {
        (escape_xml(raw_artist), None)
    };
    let second_line = artist_line2
        .map(|line| {
            format!(
                r#"<text x="200" y="152" text-anchor="middle" fill="white" font-family="system-ui, sans-serif" font-size="28" font-weight="700" filter="url(#glow)">{line}</text>"#
            )
        })
        .unwrap_or_default();

    let venue = escape_xml(&ticket.venue);
    let city = escape_xml(&ticket.city);
    let date = format_date(&ticket.date);

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 400 400" width="400" height="400">
  <defs>
    <linearGradient id="{gradient_id}" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:hsl({hue},{sat}%,{light1}%);stop-opacity:1" />
      <stop offset="50%" style="stop-color:hsl({hue2},{sat}%,{light2}%);stop-opacity:1" />
      <stop offset="100%" style="stop-color:#080808;stop-opacity:1" />
    </linearGradient>
    <filter id="glow">
      <feGaussianBlur stdDeviation="2" result="coloredBlur"/>
      <feMerge>
        <feMergeNode in="coloredBlur"/>
        <feMergeNode in="SourceGraphic"/>
      </feMerge>
    </filter>
  </defs>
  <rect width="400" height="400" fill="url(#{gradient_id})"/>
  {particles}
  <polyline id="{wave_id}" points="{wave_points}" fill="none" stroke="rgba(255,255,255,0.12)" stroke-width="2" stroke-linecap="round"/>
  <rect x="20" y="260" width="360" height="1" fill="rgba(255,255,255,0.15)"/>
  <text x="200" y="120" text-anchor="middle" fill="white" font-family="system-ui, sans-serif" font-size="28" font-weight="700" filter="url(#glow)">{artist_line1}</text>
  {second_line}
  <text x="200" y="300" text-anchor="middle" fill="rgba(255,255,255,0.9)" font-family="system-ui, sans-serif" font-size="14" font-weight="500">{venue}</text>
  <text x="200" y="322" text-anchor="middle" fill="rgba(255,255,255,0.7)" font-family="system-ui, sans-serif" font-size="12">{city} · {date}</text>
  <rect x="160" y="340" width="80" height="24" rx="4" fill="rgba(139,92,246,0.4)" stroke="rgba(139,92,246,0.8)" stroke-width="1"/>
  <text x="200" y="356" text-anchor="middle" fill="white" font-family="system-ui, sans-serif" font-size="10" font-weight="600">AFTERSHOW</text>
</svg>"##
    )
}

/// Base64 data URI wrapping of the rendered SVG.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg.trim()))
}
