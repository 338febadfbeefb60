mod properties;
mod samples;
