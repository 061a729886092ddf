mod compute_delta;
