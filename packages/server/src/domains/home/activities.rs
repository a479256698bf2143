use anyhow::Result;
use serde::Serialize;

use crate::domains::blog::activities::list_posts;
use crate::domains::blog::data::BlogPostSummary;
use crate::domains::blog::models::BlogPostFilter;
use crate::domains::departments::activities::list_departments;
use crate::domains::departments::DepartmentData;
use crate::domains::destinations::activities::list_destinations;
use crate::domains::destinations::{DestinationData, DestinationFilter};
use crate::domains::events::activities::list_events;
use crate::domains::events::{EventData, EventFilter};
use crate::domains::offers::activities::list_offers;
use crate::domains::offers::{OfferData, OfferFilter};
use crate::domains::packages::activities::list_packages;
use crate::domains::packages::{PackageData, PackageFilter};
use crate::domains::testimonials::activities::list_testimonials;
use crate::domains::testimonials::models::TestimonialFilter;
use crate::domains::testimonials::TestimonialData;
use crate::kernel::ServerDeps;
use crate::server::Visibility;

const FEATURED_LIMIT: i64 = 6;
const EVENTS_LIMIT: i64 = 4;
const POSTS_LIMIT: i64 = 3;

/// Everything the landing page renders, published content only
#[derive(Debug, Clone, Serialize)]
pub struct HomeData {
    pub destinations: Vec<DestinationData>,
    pub packages: Vec<PackageData>,
    pub offers: Vec<OfferData>,
    pub events: Vec<EventData>,
    pub departments: Vec<DepartmentData>,
    pub testimonials: Vec<TestimonialData>,
    pub posts: Vec<BlogPostSummary>,
}

pub async fn get_home(deps: &ServerDeps) -> Result<HomeData> {
    let visibility = Visibility::public();

    let destinations = DestinationFilter {
        featured: Some(true),
        limit: Some(FEATURED_LIMIT),
        ..Default::default()
    };
    let packages = PackageFilter {
        featured: Some(true),
        limit: Some(FEATURED_LIMIT),
        ..Default::default()
    };
    let offers = OfferFilter {
        active: Some(true),
        limit: Some(FEATURED_LIMIT),
        ..Default::default()
    };
    let events = EventFilter {
        upcoming: Some(true),
        limit: Some(EVENTS_LIMIT),
        ..Default::default()
    };
    let testimonials = TestimonialFilter {
        limit: Some(FEATURED_LIMIT),
        ..Default::default()
    };
    let posts = BlogPostFilter {
        limit: Some(POSTS_LIMIT),
        ..Default::default()
    };

    let (destinations, packages, offers, events, departments, testimonials, posts) = tokio::try_join!(
        list_destinations(&destinations, visibility, deps),
        list_packages(&packages, visibility, deps),
        list_offers(&offers, visibility, deps),
        list_events(&events, visibility, deps),
        list_departments(visibility, deps),
        list_testimonials(&testimonials, visibility, deps),
        list_posts(&posts, visibility, deps),
    )?;

    Ok(HomeData {
        destinations,
        packages,
        offers,
        events,
        departments,
        testimonials,
        posts,
    })
}
