//! Robots.txt parser and checker.
//!
//! Supports user-agent groups, `Allow`/`Disallow`, `*` wildcards and the
//! `$` end anchor. The most specific (longest) matching rule wins and a
//! tie goes to `Allow`. `Crawl-delay` is kept per group and `Sitemap`
//! lines for the whole file.

use std::time::Duration;

/// Parsed robots.txt rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsTxt {
    groups: Vec<Group>,
    sitemaps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Group {
    /// Lowercased product tokens, `*` for the default group
    agents: Vec<String>,
    rules: Vec<Rule>,
    /// Seconds
    crawl_delay: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    allow: bool,
    pattern: String,
}

impl RobotsTxt {
    /// Parse robots.txt content. Unknown directives are skipped.
    pub fn parse(body: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut sitemaps = Vec::new();
        // Consecutive user-agent lines share one group
        let mut collecting_agents = false;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if !collecting_agents {
                        groups.push(Group::default());
                        collecting_agents = true;
                    }
                    if let Some(group) = groups.last_mut() {
                        group.agents.push(value.to_ascii_lowercase());
                    }
                }
                "allow" | "disallow" => {
                    collecting_agents = false;
                    let Some(group) = groups.last_mut() else {
                        continue;
                    };
                    // `Disallow:` with no path allows everything
                    if !value.is_empty() {
                        group.rules.push(Rule {
                            allow: key == "allow",
                            pattern: value.to_owned(),
                        });
                    }
                }
                "crawl-delay" => {
                    collecting_agents = false;
                    let delay = value.parse::<f64>().ok().filter(|d| d.is_finite() && *d >= 0.0);
                    if let (Some(group), Some(delay)) = (groups.last_mut(), delay) {
                        group.crawl_delay = Some(delay);
                    }
                }
                "sitemap" => {
                    // Not tied to any group
                    if !value.is_empty() {
                        sitemaps.push(value.to_owned());
                    }
                }
                _ => collecting_agents = false,
            }
        }

        Self { groups, sitemaps }
    }

    /// Groups that apply to `user_agent`: every group naming its product
    /// token, or the `*` groups when none does.
    fn groups_for(&self, user_agent: &str) -> Vec<&Group> {
        let product = user_agent
            .split('/')
            .next()
            .unwrap_or(user_agent)
            .trim()
            .to_ascii_lowercase();

        let specific: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| {
                g.agents
                    .iter()
                    .any(|a| a != "*" && !a.is_empty() && product.contains(a.as_str()))
            })
            .collect();

        if specific.is_empty() {
            self.groups
                .iter()
                .filter(|g| g.agents.iter().any(|a| a == "*"))
                .collect()
        } else {
            specific
        }
    }

    /// Whether `user_agent` may fetch `path`.
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let best = self
            .groups_for(user_agent)
            .into_iter()
            .flat_map(|g| g.rules.iter())
            .filter(|rule| pattern_matches(&rule.pattern, path))
            .max_by(|a, b| {
                a.pattern
                    .len()
                    .cmp(&b.pattern.len())
                    .then(a.allow.cmp(&b.allow))
            });

        best.map_or(true, |rule| rule.allow)
    }

    /// Crawl delay of the first applicable group that sets one.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        self.groups_for(user_agent)
            .into_iter()
            .find_map(|g| g.crawl_delay)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// True when even the site root is off limits.
    pub fn disallows_all(&self, user_agent: &str) -> bool {
        !self.is_allowed(user_agent, "/")
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(p) => (p, true),
        None => (pattern, false),
    };

    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or("");
    let Some(mut rest) = path.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        return !anchored || rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }

    if anchored {
        rest.ends_with(last)
    } else {
        rest.contains(last)
    }
}
